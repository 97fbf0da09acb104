//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Reads
//! take `&PgPool`; writes take `&mut PgConnection` so they can run inside
//! the import transaction.

pub mod attribute_repo;
pub mod catalog_repo;
pub mod entity_repo;
pub mod image_repo;
pub mod product_repo;

pub use attribute_repo::{AttributeNameRepo, AttributeRepo, AttributeValueRepo};
pub use catalog_repo::CatalogRepo;
pub use entity_repo::EntityRepo;
pub use image_repo::{ImageRepo, ProductImageRepo};
pub use product_repo::{ProductAttributesRepo, ProductRepo};
