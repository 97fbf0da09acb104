use axum::routing::post;
use axum::Router;

use crate::handlers::import;
use crate::state::AppState;

/// ```text
/// POST /import  -> import_data
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/import", post(import::import_data))
}
