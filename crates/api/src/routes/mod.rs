pub mod detail;
pub mod health;
pub mod import;

use axum::Router;

use crate::state::AppState;

/// Build the catalog route tree, mounted at the root.
///
/// ```text
/// POST /import                          batch import (all-or-nothing)
///
/// GET  /detail/{type_name}              all records, summary form
/// GET  /detail/{type_name}/{id}/        one record, detail form
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(import::router())
        .nest("/detail", detail::router())
}
