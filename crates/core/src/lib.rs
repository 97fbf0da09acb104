//! Pure domain logic for the catalog import service.
//!
//! Nothing in this crate touches the database: it resolves type names,
//! validates external payloads and produces typed records that the
//! `catalog-db` crate persists.

pub mod entity;
pub mod error;
pub mod mapping;
pub mod records;
pub mod types;
