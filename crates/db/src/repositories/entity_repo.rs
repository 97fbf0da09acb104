//! Dispatch from an [`EntityKind`] to the matching typed repository.
//!
//! Used by the generic import, list and detail endpoints, which only know
//! the type name at request time.

use catalog_core::entity::{EntityKind, Representation};
use catalog_core::records::ImportRecord;
use catalog_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::entity::{EntityList, EntityView};
use crate::repositories::{
    AttributeNameRepo, AttributeRepo, AttributeValueRepo, CatalogRepo, ImageRepo,
    ProductAttributesRepo, ProductImageRepo, ProductRepo,
};

pub struct EntityRepo;

impl EntityRepo {
    /// All rows of `kind` in summary representation, ordered by id.
    pub async fn list(pool: &PgPool, kind: EntityKind) -> Result<EntityList, sqlx::Error> {
        Ok(match kind {
            EntityKind::AttributeName => EntityList::AttributeName(AttributeNameRepo::list(pool).await?),
            EntityKind::AttributeValue => {
                EntityList::AttributeValue(AttributeValueRepo::list(pool).await?)
            }
            EntityKind::Attribute => EntityList::Attribute(AttributeRepo::list(pool).await?),
            EntityKind::Product => EntityList::Product(ProductRepo::list(pool).await?),
            EntityKind::ProductAttributes => {
                EntityList::ProductAttributes(ProductAttributesRepo::list(pool).await?)
            }
            EntityKind::Image => EntityList::Image(ImageRepo::list(pool).await?),
            EntityKind::ProductImage => EntityList::ProductImage(ProductImageRepo::list(pool).await?),
            EntityKind::Catalog => EntityList::Catalog(CatalogRepo::list(pool).await?),
        })
    }

    /// One row of `kind` in the requested representation.
    pub async fn find(
        pool: &PgPool,
        kind: EntityKind,
        id: DbId,
        representation: Representation,
    ) -> Result<Option<EntityView>, sqlx::Error> {
        use Representation::{Detail, Summary};

        Ok(match (kind, representation) {
            (EntityKind::AttributeName, _) => AttributeNameRepo::find_by_id(pool, id)
                .await?
                .map(EntityView::AttributeName),
            (EntityKind::AttributeValue, _) => AttributeValueRepo::find_by_id(pool, id)
                .await?
                .map(EntityView::AttributeValue),
            (EntityKind::Product, _) => ProductRepo::find_by_id(pool, id)
                .await?
                .map(EntityView::Product),
            (EntityKind::Image, _) => ImageRepo::find_by_id(pool, id)
                .await?
                .map(EntityView::Image),

            (EntityKind::Attribute, Summary) => AttributeRepo::find_by_id(pool, id)
                .await?
                .map(EntityView::Attribute),
            (EntityKind::Attribute, Detail) => AttributeRepo::find_detail(pool, id)
                .await?
                .map(EntityView::AttributeDetail),

            (EntityKind::ProductAttributes, Summary) => ProductAttributesRepo::find_by_id(pool, id)
                .await?
                .map(EntityView::ProductAttributes),
            (EntityKind::ProductAttributes, Detail) => {
                ProductAttributesRepo::find_detail(pool, id)
                    .await?
                    .map(EntityView::ProductAttributesDetail)
            }

            (EntityKind::ProductImage, Summary) => ProductImageRepo::find_by_id(pool, id)
                .await?
                .map(EntityView::ProductImage),
            (EntityKind::ProductImage, Detail) => ProductImageRepo::find_detail(pool, id)
                .await?
                .map(EntityView::ProductImageDetail),

            (EntityKind::Catalog, Summary) => CatalogRepo::find_by_id(pool, id)
                .await?
                .map(EntityView::Catalog),
            (EntityKind::Catalog, Detail) => CatalogRepo::find_detail(pool, id)
                .await?
                .map(EntityView::CatalogDetail),
        })
    }

    /// Ids from `ids` with no matching row in `kind`'s table, in input order.
    pub async fn missing_ids(
        conn: &mut PgConnection,
        kind: EntityKind,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        // Table names come from a closed enum, never from input.
        let query = format!("SELECT id FROM {} WHERE id = ANY($1)", kind.table());
        let found = sqlx::query_scalar::<_, DbId>(&query)
            .bind(ids)
            .fetch_all(conn)
            .await?;
        Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
    }

    /// Write a validated record with the matching repository.
    pub async fn upsert(conn: &mut PgConnection, record: &ImportRecord) -> Result<(), sqlx::Error> {
        match record {
            ImportRecord::AttributeName(r) => {
                AttributeNameRepo::upsert(conn, r).await?;
            }
            ImportRecord::AttributeValue(r) => {
                AttributeValueRepo::upsert(conn, r).await?;
            }
            ImportRecord::Attribute(r) => {
                AttributeRepo::upsert(conn, r).await?;
            }
            ImportRecord::Product(r) => {
                ProductRepo::upsert(conn, r).await?;
            }
            ImportRecord::ProductAttributes(r) => {
                ProductAttributesRepo::upsert(conn, r).await?;
            }
            ImportRecord::Image(r) => {
                ImageRepo::upsert(conn, r).await?;
            }
            ImportRecord::ProductImage(r) => {
                ProductImageRepo::upsert(conn, r).await?;
            }
            ImportRecord::Catalog(r) => {
                CatalogRepo::upsert(conn, r).await?;
            }
        }
        tracing::debug!(entity = %record.kind(), id = record.id(), "Record upserted");
        Ok(())
    }
}
