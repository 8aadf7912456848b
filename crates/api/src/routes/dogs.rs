use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dogs;
use crate::state::AppState;

/// Dog listing routes mounted at `/dogs`.
///
/// ```text
/// GET    /                -> list
/// GET    /{id}            -> get_by_id
/// DELETE /{id}            -> delete
/// POST   /{id}/delete     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dogs::list))
        .route("/{id}", get(dogs::get_by_id).delete(dogs::delete))
        .route("/{id}/delete", post(dogs::delete))
}

/// The multipart add-dog route, also mounted at `/dogs`.
///
/// ```text
/// POST   /                -> create
/// ```
///
/// Kept apart from [`router`] so it runs under the upload timeout instead
/// of the request timeout.
pub fn upload_router() -> Router<AppState> {
    Router::new().route("/", post(dogs::create))
}
