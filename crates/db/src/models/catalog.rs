//! Catalog model.
//!
//! A catalog owns an optional cover image and many-to-many links to
//! products (`catalog_products`) and attributes (`catalog_attributes`).

use catalog_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

use super::attribute::AttributeDetail;
use super::image::Image;
use super::product::Product;

/// A `catalog` row together with its linked ids, in ascending order.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Catalog {
    pub id: DbId,
    #[serde(rename = "nazev")]
    pub name: Option<String>,
    #[serde(rename = "obrazek_id")]
    pub image_id: Option<DbId>,
    #[serde(rename = "products_ids")]
    pub product_ids: Vec<DbId>,
    #[serde(rename = "attributes_ids")]
    pub attribute_ids: Vec<DbId>,
}

/// A catalog with its image, attributes and products embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogDetail {
    pub id: DbId,
    #[serde(rename = "nazev")]
    pub name: Option<String>,
    #[serde(rename = "Image")]
    pub image: Option<Image>,
    #[serde(rename = "Attributes")]
    pub attributes: Vec<AttributeDetail>,
    #[serde(rename = "Products")]
    pub products: Vec<Product>,
}
