//! Repositories for `attribute_name`, `attribute_value` and `attribute`.

use catalog_core::records::{AttributeNameRecord, AttributeRecord, AttributeValueRecord};
use catalog_core::types::DbId;
use sqlx::{FromRow, PgConnection, PgPool};

use crate::models::attribute::{Attribute, AttributeDetail, AttributeName, AttributeValue};

const NAME_COLUMNS: &str = "id, name, code, display";
const VALUE_COLUMNS: &str = "id, value";
const COLUMNS: &str = "id, attribute_name_id, attribute_value_id";

/// Attribute joined with its name and value in one row.
const DETAIL_SELECT: &str = "SELECT a.id, \
        n.id AS name_id, n.name AS name_name, n.code AS name_code, n.display AS name_display, \
        v.id AS value_id, v.value AS value_value \
     FROM attribute a \
     JOIN attribute_name n ON n.id = a.attribute_name_id \
     JOIN attribute_value v ON v.id = a.attribute_value_id";

#[derive(FromRow)]
struct AttributeDetailRow {
    id: DbId,
    name_id: DbId,
    name_name: Option<String>,
    name_code: Option<String>,
    name_display: bool,
    value_id: DbId,
    value_value: String,
}

impl From<AttributeDetailRow> for AttributeDetail {
    fn from(row: AttributeDetailRow) -> Self {
        AttributeDetail {
            id: row.id,
            attribute_name: AttributeName {
                id: row.name_id,
                name: row.name_name,
                code: row.name_code,
                display: row.name_display,
            },
            attribute_value: AttributeValue {
                id: row.value_id,
                value: row.value_value,
            },
        }
    }
}

pub struct AttributeNameRepo;

impl AttributeNameRepo {
    /// Insert or fully replace an attribute name.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &AttributeNameRecord,
    ) -> Result<AttributeName, sqlx::Error> {
        let query = format!(
            "INSERT INTO attribute_name (id, name, code, display) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET \
                name = EXCLUDED.name, \
                code = EXCLUDED.code, \
                display = EXCLUDED.display \
             RETURNING {NAME_COLUMNS}"
        );
        sqlx::query_as::<_, AttributeName>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.display)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AttributeName>, sqlx::Error> {
        let query = format!("SELECT {NAME_COLUMNS} FROM attribute_name WHERE id = $1");
        sqlx::query_as::<_, AttributeName>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<AttributeName>, sqlx::Error> {
        let query = format!("SELECT {NAME_COLUMNS} FROM attribute_name ORDER BY id");
        sqlx::query_as::<_, AttributeName>(&query)
            .fetch_all(pool)
            .await
    }
}

pub struct AttributeValueRepo;

impl AttributeValueRepo {
    /// Insert or fully replace an attribute value.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &AttributeValueRecord,
    ) -> Result<AttributeValue, sqlx::Error> {
        let query = format!(
            "INSERT INTO attribute_value (id, value) \
             VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET value = EXCLUDED.value \
             RETURNING {VALUE_COLUMNS}"
        );
        sqlx::query_as::<_, AttributeValue>(&query)
            .bind(input.id)
            .bind(&input.value)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AttributeValue>, sqlx::Error> {
        let query = format!("SELECT {VALUE_COLUMNS} FROM attribute_value WHERE id = $1");
        sqlx::query_as::<_, AttributeValue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<AttributeValue>, sqlx::Error> {
        let query = format!("SELECT {VALUE_COLUMNS} FROM attribute_value ORDER BY id");
        sqlx::query_as::<_, AttributeValue>(&query)
            .fetch_all(pool)
            .await
    }
}

/// Provides reads and upserts for attribute name/value pairs.
pub struct AttributeRepo;

impl AttributeRepo {
    /// Insert or fully replace an attribute. Both referenced rows must exist.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &AttributeRecord,
    ) -> Result<Attribute, sqlx::Error> {
        let query = format!(
            "INSERT INTO attribute (id, attribute_name_id, attribute_value_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET \
                attribute_name_id = EXCLUDED.attribute_name_id, \
                attribute_value_id = EXCLUDED.attribute_value_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(input.id)
            .bind(input.attribute_name_id)
            .bind(input.attribute_value_id)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attribute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attribute WHERE id = $1");
        sqlx::query_as::<_, Attribute>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Attribute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attribute ORDER BY id");
        sqlx::query_as::<_, Attribute>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find an attribute with its name and value embedded.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AttributeDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE a.id = $1");
        let row = sqlx::query_as::<_, AttributeDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(AttributeDetail::from))
    }

    /// All attributes linked to a catalog, with names and values embedded.
    pub async fn list_details_for_catalog(
        pool: &PgPool,
        catalog_id: DbId,
    ) -> Result<Vec<AttributeDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT} \
             JOIN catalog_attributes ca ON ca.attribute_id = a.id \
             WHERE ca.catalog_id = $1 \
             ORDER BY a.id"
        );
        let rows = sqlx::query_as::<_, AttributeDetailRow>(&query)
            .bind(catalog_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(AttributeDetail::from).collect())
    }
}
