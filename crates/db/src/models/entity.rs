//! Type-erased views over any entity, for the generic list/detail endpoints.
//!
//! Both enums are `untagged`, so they serialize exactly like the wrapped
//! model.

use serde::Serialize;

use super::attribute::{Attribute, AttributeDetail, AttributeName, AttributeValue};
use super::catalog::{Catalog, CatalogDetail};
use super::image::{Image, ProductImage, ProductImageDetail};
use super::product::{Product, ProductAttributes, ProductAttributesDetail};

/// All rows of one entity type, in summary representation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EntityList {
    AttributeName(Vec<AttributeName>),
    AttributeValue(Vec<AttributeValue>),
    Attribute(Vec<Attribute>),
    Product(Vec<Product>),
    ProductAttributes(Vec<ProductAttributes>),
    Image(Vec<Image>),
    ProductImage(Vec<ProductImage>),
    Catalog(Vec<Catalog>),
}

impl EntityList {
    pub fn len(&self) -> usize {
        match self {
            EntityList::AttributeName(rows) => rows.len(),
            EntityList::AttributeValue(rows) => rows.len(),
            EntityList::Attribute(rows) => rows.len(),
            EntityList::Product(rows) => rows.len(),
            EntityList::ProductAttributes(rows) => rows.len(),
            EntityList::Image(rows) => rows.len(),
            EntityList::ProductImage(rows) => rows.len(),
            EntityList::Catalog(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single row in either summary or detail representation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EntityView {
    AttributeName(AttributeName),
    AttributeValue(AttributeValue),
    Attribute(Attribute),
    AttributeDetail(AttributeDetail),
    Product(Product),
    ProductAttributes(ProductAttributes),
    ProductAttributesDetail(ProductAttributesDetail),
    Image(Image),
    ProductImage(ProductImage),
    ProductImageDetail(ProductImageDetail),
    Catalog(Catalog),
    CatalogDetail(CatalogDetail),
}
