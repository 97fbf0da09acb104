//! Registry of importable entity types.
//!
//! The set of type names is closed, so resolution is a plain match rather
//! than a lookup table built at runtime.

use std::fmt;

use crate::error::CoreError;

/// One of the record types accepted by the import endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    AttributeName,
    AttributeValue,
    Attribute,
    Product,
    ProductAttributes,
    Image,
    ProductImage,
    Catalog,
}

/// How related entities appear in an outgoing representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Foreign keys rendered as bare ids.
    Summary,
    /// Foreign keys expanded into nested objects.
    Detail,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::AttributeName,
        EntityKind::AttributeValue,
        EntityKind::Attribute,
        EntityKind::Product,
        EntityKind::ProductAttributes,
        EntityKind::Image,
        EntityKind::ProductImage,
        EntityKind::Catalog,
    ];

    /// External type name used in import payloads and URLs.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::AttributeName => "AttributeName",
            EntityKind::AttributeValue => "AttributeValue",
            EntityKind::Attribute => "Attribute",
            EntityKind::Product => "Product",
            EntityKind::ProductAttributes => "ProductAttributes",
            EntityKind::Image => "Image",
            EntityKind::ProductImage => "ProductImage",
            EntityKind::Catalog => "Catalog",
        }
    }

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::AttributeName => "attribute_name",
            EntityKind::AttributeValue => "attribute_value",
            EntityKind::Attribute => "attribute",
            EntityKind::Product => "product",
            EntityKind::ProductAttributes => "product_attributes",
            EntityKind::Image => "image",
            EntityKind::ProductImage => "product_image",
            EntityKind::Catalog => "catalog",
        }
    }

    /// Tolerant lookup: `None` for an unrecognized name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Strict lookup: an unrecognized name is a validation failure.
    pub fn resolve(name: &str) -> Result<Self, CoreError> {
        Self::from_name(name).ok_or_else(|| CoreError::UnknownEntity(name.to_string()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
