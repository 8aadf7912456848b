use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shelter_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
/// Server-side failures are logged in full and reported to the client with
/// a generic message only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `shelter_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed or oversized multipart body.
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// A request that is not `multipart/form-data` at all.
    #[error("Multipart rejected: {0}")]
    MultipartBody(#[from] MultipartRejection),

    /// A form body that could not be decoded.
    #[error("Form rejected: {0}")]
    Form(#[from] FormRejection),

    /// A path parameter that could not be parsed.
    #[error("Path rejected: {0}")]
    Path(#[from] PathRejection),

    /// A query string that could not be parsed.
    #[error("Query rejected: {0}")]
    Query(#[from] QueryRejection),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Message returned to clients for every 5xx response.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    tracing::warn!(error = %msg, "Validation failed");
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::Multipart(err) => {
                let status = err.status();
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "BAD_REQUEST"
                };
                (status, code, err.body_text())
            }
            AppError::MultipartBody(rejection) => {
                rejected(rejection.status(), rejection.body_text())
            }
            AppError::Form(rejection) => rejected(rejection.status(), rejection.body_text()),
            AppError::Path(rejection) => rejected(rejection.status(), rejection.body_text()),
            AppError::Query(rejection) => rejected(rejection.status(), rejection.body_text()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        GENERIC_FAILURE.to_string(),
    )
}

/// Map an axum extractor rejection onto the JSON error envelope.
fn rejected(status: StatusCode, message: String) -> (StatusCode, &'static str, String) {
    let code = match status {
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        s if s.is_server_error() => {
            tracing::error!(error = %message, "Extractor failed");
            return internal();
        }
        _ => "BAD_REQUEST",
    };
    (status, code, message)
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
