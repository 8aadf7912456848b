pub mod contact_requests;
pub mod dogs;
pub mod health;
pub mod query;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dogs                                 list (create is mounted by the app
///                                       router under the upload timeout)
/// /dogs/{id}                            get, delete
/// /dogs/{id}/delete                     delete (POST, for HTML forms)
///
/// /contact-requests                     create (form-urlencoded)
///
/// /query/dogs                           dog connection (first/after, last/before)
/// /query/contact-requests               contact request connection
/// /query/node/{global_id}               global id lookup
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/dogs", dogs::router())
        .nest("/contact-requests", contact_requests::router())
        .nest("/query", query::router())
}
