use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::entity::{EntityKind, Representation};
use catalog_core::types::DbId;
use catalog_db::repositories::EntityRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /detail/{type_name}
///
/// All records of the type in summary form. An unrecognized type name
/// yields an empty array.
pub async fn list_records(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
) -> AppResult<Response> {
    let Some(kind) = EntityKind::from_name(&type_name) else {
        tracing::debug!(type_name = %type_name, "List requested for unknown type");
        return Ok(Json(Vec::<Value>::new()).into_response());
    };

    let records = EntityRepo::list(&state.pool, kind).await?;
    tracing::debug!(entity = %kind, count = records.len(), "Listed records");

    Ok(Json(records).into_response())
}

/// GET /detail/{type_name}/{id}/
///
/// One record in detail form. A missing record is a bare 400 with no body.
pub async fn get_record(
    State(state): State<AppState>,
    path: Result<Path<(String, DbId)>, PathRejection>,
) -> AppResult<Response> {
    let Path((type_name, id)) =
        path.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let kind = EntityKind::resolve(&type_name)?;

    match EntityRepo::find(&state.pool, kind, id, Representation::Detail).await? {
        Some(record) => Ok(Json(record).into_response()),
        None => Ok(StatusCode::BAD_REQUEST.into_response()),
    }
}
