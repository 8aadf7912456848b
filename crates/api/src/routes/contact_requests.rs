use axum::routing::post;
use axum::Router;

use crate::handlers::contact_requests;
use crate::state::AppState;

/// Contact request routes mounted at `/contact-requests`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(contact_requests::create))
}
