//! Row models and their external representations.
//!
//! Each row struct derives `FromRow` for reads and `Serialize` with the
//! external (localized) field names, which makes it the summary
//! representation. `*Detail` structs nest the related rows instead of ids.

pub mod attribute;
pub mod catalog;
pub mod entity;
pub mod image;
pub mod product;
