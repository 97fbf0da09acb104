//! Typed internal records produced by the field mapper.
//!
//! Field names here are the internal column names; the external
//! (localized) names only exist in the mapper and in the row models'
//! serde attributes.

use rust_decimal::Decimal;

use crate::entity::EntityKind;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeNameRecord {
    pub id: DbId,
    pub name: Option<String>,
    pub code: Option<String>,
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeValueRecord {
    pub id: DbId,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRecord {
    pub id: DbId,
    pub attribute_name_id: DbId,
    pub attribute_value_id: DbId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: DbId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub currency: Option<String>,
    pub published_on: Option<Timestamp>,
    pub is_published: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductAttributesRecord {
    pub id: DbId,
    pub attribute_id: DbId,
    pub product_id: DbId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub id: DbId,
    pub image: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductImageRecord {
    pub id: DbId,
    pub product_id: DbId,
    pub image_id: DbId,
    pub name: Option<String>,
}

/// Catalog with its full product id set.
///
/// `attribute_ids` is `None` when the payload omits the key, in which case
/// the existing attribute links are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub id: DbId,
    pub name: Option<String>,
    pub image_id: Option<DbId>,
    pub product_ids: Vec<DbId>,
    pub attribute_ids: Option<Vec<DbId>>,
}

/// A validated record of any importable type.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportRecord {
    AttributeName(AttributeNameRecord),
    AttributeValue(AttributeValueRecord),
    Attribute(AttributeRecord),
    Product(ProductRecord),
    ProductAttributes(ProductAttributesRecord),
    Image(ImageRecord),
    ProductImage(ProductImageRecord),
    Catalog(CatalogRecord),
}

/// Ids a record points at, grouped by the external field that carried them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub target: EntityKind,
    pub ids: Vec<DbId>,
}

impl Reference {
    fn one(field: &'static str, target: EntityKind, id: DbId) -> Self {
        Self {
            field,
            target,
            ids: vec![id],
        }
    }
}

impl ImportRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            ImportRecord::AttributeName(_) => EntityKind::AttributeName,
            ImportRecord::AttributeValue(_) => EntityKind::AttributeValue,
            ImportRecord::Attribute(_) => EntityKind::Attribute,
            ImportRecord::Product(_) => EntityKind::Product,
            ImportRecord::ProductAttributes(_) => EntityKind::ProductAttributes,
            ImportRecord::Image(_) => EntityKind::Image,
            ImportRecord::ProductImage(_) => EntityKind::ProductImage,
            ImportRecord::Catalog(_) => EntityKind::Catalog,
        }
    }

    pub fn id(&self) -> DbId {
        match self {
            ImportRecord::AttributeName(r) => r.id,
            ImportRecord::AttributeValue(r) => r.id,
            ImportRecord::Attribute(r) => r.id,
            ImportRecord::Product(r) => r.id,
            ImportRecord::ProductAttributes(r) => r.id,
            ImportRecord::Image(r) => r.id,
            ImportRecord::ProductImage(r) => r.id,
            ImportRecord::Catalog(r) => r.id,
        }
    }

    /// Foreign keys that must resolve to existing rows before the record
    /// can be written. Empty id lists are omitted.
    pub fn references(&self) -> Vec<Reference> {
        match self {
            ImportRecord::AttributeName(_)
            | ImportRecord::AttributeValue(_)
            | ImportRecord::Product(_)
            | ImportRecord::Image(_) => Vec::new(),
            ImportRecord::Attribute(r) => vec![
                Reference::one("nazev_atributu_id", EntityKind::AttributeName, r.attribute_name_id),
                Reference::one("hodnota_atributu_id", EntityKind::AttributeValue, r.attribute_value_id),
            ],
            ImportRecord::ProductAttributes(r) => vec![
                Reference::one("attribute", EntityKind::Attribute, r.attribute_id),
                Reference::one("product", EntityKind::Product, r.product_id),
            ],
            ImportRecord::ProductImage(r) => vec![
                Reference::one("product", EntityKind::Product, r.product_id),
                Reference::one("obrazek_id", EntityKind::Image, r.image_id),
            ],
            ImportRecord::Catalog(r) => {
                let mut refs = Vec::new();
                if let Some(image_id) = r.image_id {
                    refs.push(Reference::one("obrazek_id", EntityKind::Image, image_id));
                }
                if !r.product_ids.is_empty() {
                    refs.push(Reference {
                        field: "products_ids",
                        target: EntityKind::Product,
                        ids: r.product_ids.clone(),
                    });
                }
                if let Some(ids) = r.attribute_ids.as_ref().filter(|ids| !ids.is_empty()) {
                    refs.push(Reference {
                        field: "attributes_ids",
                        target: EntityKind::Attribute,
                        ids: ids.clone(),
                    });
                }
                refs
            }
        }
    }
}
