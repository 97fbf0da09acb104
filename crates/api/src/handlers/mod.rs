pub mod detail;
pub mod import;
