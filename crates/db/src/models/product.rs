use catalog_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use super::attribute::AttributeDetail;

/// A row from the `product` table.
///
/// `cena` serializes as a decimal string (e.g. `"199.00"`).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    #[serde(rename = "nazev")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "cena")]
    pub cost: Option<Decimal>,
    #[serde(rename = "mena")]
    pub currency: Option<String>,
    pub published_on: Option<Timestamp>,
    pub is_published: bool,
}

/// A row from the `product_attributes` junction table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ProductAttributes {
    pub id: DbId,
    #[serde(rename = "attribute")]
    pub attribute_id: DbId,
    #[serde(rename = "product")]
    pub product_id: DbId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductAttributesDetail {
    pub id: DbId,
    #[serde(rename = "Attribute")]
    pub attribute: AttributeDetail,
    #[serde(rename = "Product")]
    pub product: Product,
}
