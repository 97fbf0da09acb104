//! Response bodies shared by API handlers.

use serde::Serialize;

/// Body returned by a committed import batch.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub imported_count: usize,
}

impl ImportResponse {
    pub fn imported(imported_count: usize) -> Self {
        Self {
            success: true,
            imported_count,
        }
    }
}
