use axum::routing::get;
use axum::Router;

use crate::handlers::query;
use crate::state::AppState;

/// Read-only query routes mounted at `/query`.
///
/// ```text
/// GET /dogs                -> dogs
/// GET /contact-requests    -> contact_requests
/// GET /node/{global_id}    -> node
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dogs", get(query::dogs))
        .route("/contact-requests", get(query::contact_requests))
        .route("/node/{global_id}", get(query::node))
}
