//! Repositories for the `product` and `product_attributes` tables.

use catalog_core::records::{ProductAttributesRecord, ProductRecord};
use catalog_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::product::{Product, ProductAttributes, ProductAttributesDetail};
use crate::repositories::AttributeRepo;

/// Column list for the `product` table.
const COLUMNS: &str = "id, name, description, cost, currency, published_on, is_published";

/// Same columns, qualified for JOIN queries.
const QUALIFIED_COLUMNS: &str =
    "p.id, p.name, p.description, p.cost, p.currency, p.published_on, p.is_published";

const LINK_COLUMNS: &str = "id, attribute_id, product_id";

pub struct ProductRepo;

impl ProductRepo {
    /// Insert or fully replace a product.
    pub async fn upsert(conn: &mut PgConnection, input: &ProductRecord) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO product \
                (id, name, description, cost, currency, published_on, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET \
                name = EXCLUDED.name, \
                description = EXCLUDED.description, \
                cost = EXCLUDED.cost, \
                currency = EXCLUDED.currency, \
                published_on = EXCLUDED.published_on, \
                is_published = EXCLUDED.is_published \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.cost)
            .bind(&input.currency)
            .bind(input.published_on)
            .bind(input.is_published)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product ORDER BY id");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Products linked to a catalog, ordered by id.
    pub async fn list_for_catalog(
        pool: &PgPool,
        catalog_id: DbId,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} \
             FROM product p \
             JOIN catalog_products cp ON cp.product_id = p.id \
             WHERE cp.catalog_id = $1 \
             ORDER BY p.id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(catalog_id)
            .fetch_all(pool)
            .await
    }
}

/// Links between products and attributes.
pub struct ProductAttributesRepo;

impl ProductAttributesRepo {
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &ProductAttributesRecord,
    ) -> Result<ProductAttributes, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_attributes (id, attribute_id, product_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET \
                attribute_id = EXCLUDED.attribute_id, \
                product_id = EXCLUDED.product_id \
             RETURNING {LINK_COLUMNS}"
        );
        sqlx::query_as::<_, ProductAttributes>(&query)
            .bind(input.id)
            .bind(input.attribute_id)
            .bind(input.product_id)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductAttributes>, sqlx::Error> {
        let query = format!("SELECT {LINK_COLUMNS} FROM product_attributes WHERE id = $1");
        sqlx::query_as::<_, ProductAttributes>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<ProductAttributes>, sqlx::Error> {
        let query = format!("SELECT {LINK_COLUMNS} FROM product_attributes ORDER BY id");
        sqlx::query_as::<_, ProductAttributes>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a link with the full attribute detail and product embedded.
    ///
    /// Returns `None` if the link, or a row it points at, does not exist.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductAttributesDetail>, sqlx::Error> {
        let Some(link) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let attribute = AttributeRepo::find_detail(pool, link.attribute_id).await?;
        let product = ProductRepo::find_by_id(pool, link.product_id).await?;

        Ok(match (attribute, product) {
            (Some(attribute), Some(product)) => Some(ProductAttributesDetail {
                id: link.id,
                attribute,
                product,
            }),
            _ => None,
        })
    }
}
