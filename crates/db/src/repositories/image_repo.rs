//! Repositories for the `image` and `product_image` tables.

use catalog_core::records::{ImageRecord, ProductImageRecord};
use catalog_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::image::{Image, ProductImage, ProductImageDetail};
use crate::repositories::ProductRepo;

const COLUMNS: &str = "id, image, name";
const LINK_COLUMNS: &str = "id, product_id, image_id, name";

pub struct ImageRepo;

impl ImageRepo {
    /// Insert or fully replace an image.
    pub async fn upsert(conn: &mut PgConnection, input: &ImageRecord) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO image (id, image, name) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET \
                image = EXCLUDED.image, \
                name = EXCLUDED.name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(input.id)
            .bind(&input.image)
            .bind(&input.name)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM image WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM image ORDER BY id");
        sqlx::query_as::<_, Image>(&query).fetch_all(pool).await
    }
}

pub struct ProductImageRepo;

impl ProductImageRepo {
    /// Insert or fully replace a product image link.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &ProductImageRecord,
    ) -> Result<ProductImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_image (id, product_id, image_id, name) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET \
                product_id = EXCLUDED.product_id, \
                image_id = EXCLUDED.image_id, \
                name = EXCLUDED.name \
             RETURNING {LINK_COLUMNS}"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(input.id)
            .bind(input.product_id)
            .bind(input.image_id)
            .bind(&input.name)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductImage>, sqlx::Error> {
        let query = format!("SELECT {LINK_COLUMNS} FROM product_image WHERE id = $1");
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!("SELECT {LINK_COLUMNS} FROM product_image ORDER BY id");
        sqlx::query_as::<_, ProductImage>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a product image with its image and product embedded.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductImageDetail>, sqlx::Error> {
        let Some(link) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let image = ImageRepo::find_by_id(pool, link.image_id).await?;
        let product = ProductRepo::find_by_id(pool, link.product_id).await?;

        Ok(match (image, product) {
            (Some(image), Some(product)) => Some(ProductImageDetail {
                id: link.id,
                name: link.name,
                image,
                product,
            }),
            _ => None,
        })
    }
}
