//! Read-only routes mounted at `/detail`.

use axum::routing::get;
use axum::Router;

use crate::handlers::detail;
use crate::state::AppState;

/// ```text
/// GET /{type_name}          -> list_records
/// GET /{type_name}/{id}     -> get_record
/// GET /{type_name}/{id}/    -> get_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{type_name}", get(detail::list_records))
        .route("/{type_name}/{id}", get(detail::get_record))
        .route("/{type_name}/{id}/", get(detail::get_record))
}
