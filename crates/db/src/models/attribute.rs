//! Attribute names, values and the name/value pairs built from them.

use catalog_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `attribute_name` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct AttributeName {
    pub id: DbId,
    #[serde(rename = "nazev")]
    pub name: Option<String>,
    #[serde(rename = "kod")]
    pub code: Option<String>,
    #[serde(rename = "zobrazit")]
    pub display: bool,
}

/// A row from the `attribute_value` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct AttributeValue {
    pub id: DbId,
    #[serde(rename = "hodnota")]
    pub value: String,
}

/// A row from the `attribute` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Attribute {
    pub id: DbId,
    #[serde(rename = "nazev_atributu_id")]
    pub attribute_name_id: DbId,
    #[serde(rename = "hodnota_atributu_id")]
    pub attribute_value_id: DbId,
}

/// An attribute with its name and value embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDetail {
    pub id: DbId,
    #[serde(rename = "AttributeName")]
    pub attribute_name: AttributeName,
    #[serde(rename = "AttributeValue")]
    pub attribute_value: AttributeValue,
}
