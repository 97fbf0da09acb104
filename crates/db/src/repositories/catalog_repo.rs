//! Repository for the `catalog`, `catalog_products` and `catalog_attributes` tables.

use catalog_core::records::CatalogRecord;
use catalog_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::catalog::{Catalog, CatalogDetail};
use crate::repositories::{AttributeRepo, ImageRepo, ProductRepo};

/// Catalog columns plus the linked id sets as `BIGINT[]`.
const SELECT: &str = "SELECT c.id, c.name, c.image_id, \
        ARRAY(SELECT cp.product_id FROM catalog_products cp \
              WHERE cp.catalog_id = c.id ORDER BY cp.product_id) AS product_ids, \
        ARRAY(SELECT ca.attribute_id FROM catalog_attributes ca \
              WHERE ca.catalog_id = c.id ORDER BY ca.attribute_id) AS attribute_ids \
     FROM catalog c";

/// Provides upserts and reads for catalogs and their product/attribute links.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Insert or fully replace a catalog.
    ///
    /// The product links are replaced with exactly the supplied id set.
    /// Attribute links are replaced likewise, or left untouched when
    /// `attribute_ids` is `None`.
    pub async fn upsert(conn: &mut PgConnection, input: &CatalogRecord) -> Result<Catalog, sqlx::Error> {
        sqlx::query(
            "INSERT INTO catalog (id, name, image_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET \
                name = EXCLUDED.name, \
                image_id = EXCLUDED.image_id",
        )
        .bind(input.id)
        .bind(&input.name)
        .bind(input.image_id)
        .execute(&mut *conn)
        .await?;

        Self::set_products_inner(conn, input.id, &input.product_ids).await?;
        if let Some(attribute_ids) = &input.attribute_ids {
            Self::set_attributes_inner(conn, input.id, attribute_ids).await?;
        }

        let query = format!("{SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, Catalog>(&query)
            .bind(input.id)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Catalog>, sqlx::Error> {
        let query = format!("{SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, Catalog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Catalog>, sqlx::Error> {
        let query = format!("{SELECT} ORDER BY c.id");
        sqlx::query_as::<_, Catalog>(&query).fetch_all(pool).await
    }

    /// Find a catalog with its image, attributes and products embedded.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CatalogDetail>, sqlx::Error> {
        let Some(catalog) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let image = match catalog.image_id {
            Some(image_id) => ImageRepo::find_by_id(pool, image_id).await?,
            None => None,
        };
        let attributes = AttributeRepo::list_details_for_catalog(pool, id).await?;
        let products = ProductRepo::list_for_catalog(pool, id).await?;

        Ok(Some(CatalogDetail {
            id: catalog.id,
            name: catalog.name,
            image,
            attributes,
            products,
        }))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn set_products_inner(
        conn: &mut PgConnection,
        catalog_id: DbId,
        product_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM catalog_products WHERE catalog_id = $1")
            .bind(catalog_id)
            .execute(&mut *conn)
            .await?;

        if !product_ids.is_empty() {
            sqlx::query(
                "INSERT INTO catalog_products (catalog_id, product_id) \
                 SELECT $1, UNNEST($2::BIGINT[])",
            )
            .bind(catalog_id)
            .bind(product_ids)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn set_attributes_inner(
        conn: &mut PgConnection,
        catalog_id: DbId,
        attribute_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM catalog_attributes WHERE catalog_id = $1")
            .bind(catalog_id)
            .execute(&mut *conn)
            .await?;

        if !attribute_ids.is_empty() {
            sqlx::query(
                "INSERT INTO catalog_attributes (catalog_id, attribute_id) \
                 SELECT $1, UNNEST($2::BIGINT[])",
            )
            .bind(catalog_id)
            .bind(attribute_ids)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}
