//! Images and their links to products.

use catalog_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

use super::product::Product;

/// A row from the `image` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    #[serde(rename = "obrazek")]
    pub image: String,
    #[serde(rename = "nazev")]
    pub name: Option<String>,
}

/// A row from the `product_image` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ProductImage {
    pub id: DbId,
    #[serde(rename = "product")]
    pub product_id: DbId,
    #[serde(rename = "obrazek_id")]
    pub image_id: DbId,
    #[serde(rename = "nazev")]
    pub name: Option<String>,
}

/// A product image with the image and product rows embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductImageDetail {
    pub id: DbId,
    #[serde(rename = "nazev")]
    pub name: Option<String>,
    #[serde(rename = "Image")]
    pub image: Image,
    #[serde(rename = "Product")]
    pub product: Product,
}
