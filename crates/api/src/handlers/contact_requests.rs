//! Handler for adopter contact requests.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use shelter_core::validation;
use shelter_db::models::contact_request::{ContactRequest, CreateContactRequest};
use shelter_db::repositories::ContactRequestRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/contact-requests (form-urlencoded `name`, `phone`)
///
/// Echoes the stored row back as confirmation. Driver errors are logged
/// here and never shown to the client.
pub async fn create(
    State(state): State<AppState>,
    form: Result<Form<CreateContactRequest>, FormRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<ContactRequest>>)> {
    let Form(input) = form?;
    validation::require_fields(&[
        ("name", Some(input.name.as_str())),
        ("phone", Some(input.phone.as_str())),
    ])?;
    validation::check(&input)?;

    let request = ContactRequestRepo::create(&state.pool, &input)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to save contact request");
            AppError::Database(e)
        })?;

    tracing::info!(contact_request_id = request.id, "Contact request saved");

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}
