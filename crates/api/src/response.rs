//! Shared response envelope types for API handlers.
//!
//! All successful API responses use a `{ "data": ... }` envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Error envelope that still carries data for the client to redisplay.
///
/// Used when an operation fails but the caller should see the current
/// state alongside the error (e.g. the dog listing after a failed delete).
#[derive(Debug, Serialize)]
pub struct ErrorWithData<T: Serialize> {
    pub error: String,
    pub code: &'static str,
    pub data: T,
}
