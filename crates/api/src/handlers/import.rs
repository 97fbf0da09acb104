//! Handler for the all-or-nothing batch import.
//!
//! The request body is a JSON array of single-key objects such as
//! `{"Product": {...}}`. Every entry is validated and upserted inside one
//! transaction; the first failure rolls the whole batch back.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::entity::EntityKind;
use catalog_core::error::{CoreError, FieldErrors};
use catalog_core::mapping::map_record;
use catalog_core::records::ImportRecord;
use catalog_db::repositories::EntityRepo;
use serde_json::Value;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::response::ImportResponse;
use crate::state::AppState;

/// Rejection message when the body is not a JSON array.
pub const MSG_NOT_A_LIST: &str = "Please send a valid list of json";

/// Rejection message when an entry is not a non-empty JSON object.
pub const MSG_INVALID_ENTRY: &str = "Please send a valid list with json data";

/// POST /import
///
/// Returns 201 with the number of imported entries, or 200 when the list
/// is empty.
pub async fn import_data(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let Value::Array(entries) = body else {
        return Err(CoreError::Validation(MSG_NOT_A_LIST.to_string()).into());
    };

    let mut tx = state.pool.begin().await?;

    if let Err(err) = import_entries(&mut tx, &entries).await {
        // Dropping `tx` rolls back everything written so far.
        tracing::warn!(entries = entries.len(), error = %err, "Import batch rejected");
        return Err(err);
    }

    tx.commit().await?;

    let imported_count = entries.len();
    tracing::info!(imported_count, "Import batch committed");

    let status = if entries.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((status, Json(ImportResponse::imported(imported_count))))
}

/// Validate and write every entry in order on one connection.
///
/// Each key of an entry is treated as its own record, so an entry with
/// several type names imports one record per key.
async fn import_entries(conn: &mut PgConnection, entries: &[Value]) -> AppResult<()> {
    for entry in entries {
        let fields = entry
            .as_object()
            .filter(|fields| !fields.is_empty())
            .ok_or_else(|| CoreError::Validation(MSG_INVALID_ENTRY.to_string()))?;

        for (type_name, payload) in fields {
            let kind = EntityKind::resolve(type_name)?;
            let record = map_record(kind, payload)?;
            check_references(conn, &record).await?;
            EntityRepo::upsert(conn, &record).await?;
        }
    }
    Ok(())
}

/// Reject a record whose foreign keys point at rows that do not exist.
///
/// Lookups run on the import connection, so rows written earlier in the
/// same batch count as existing. Only the first missing id of each field
/// is reported.
async fn check_references(conn: &mut PgConnection, record: &ImportRecord) -> AppResult<()> {
    let mut errors = FieldErrors::new();

    for reference in record.references() {
        let missing = EntityRepo::missing_ids(conn, reference.target, &reference.ids).await?;
        if let Some(id) = missing.first() {
            errors.add(
                reference.field,
                format!("Invalid pk \"{id}\" - object does not exist."),
            );
        }
    }

    errors.into_result().map_err(CoreError::FieldValidation)?;
    Ok(())
}
