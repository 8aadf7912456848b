//! Form-level validation shared by the mutation endpoints.
//!
//! Required-field checks run before anything touches the upload directory or
//! the database. Length limits are declared on the create DTOs with
//! `validator` and folded into a single [`CoreError::Validation`] here.

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Maximum length (in characters) of a dog or adopter name.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length (in characters) of a breed.
pub const BREED_MAX_LEN: usize = 100;

/// Maximum length (in characters) of a phone number.
pub const PHONE_MAX_LEN: usize = 20;

/// Maximum length (in characters) of a stored image filename.
pub const IMAGE_FILENAME_MAX_LEN: usize = 255;

/// `true` when a form value is absent, empty, or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Reject the submission if any of the named fields is blank.
///
/// The error lists every missing field, in the order given.
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Result<(), CoreError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Please fill in all fields (missing: {})",
            missing.join(", ")
        )))
    }
}

/// Parse the `age` form field into a non-negative integer.
///
/// Surrounding whitespace is ignored. Anything that is not a base-10
/// integer in `0..=i32::MAX` is rejected.
pub fn parse_age(raw: &str) -> Result<i32, CoreError> {
    let trimmed = raw.trim();
    let age: i32 = trimmed.parse().map_err(|_| {
        CoreError::Validation(format!("age must be a whole number, got '{trimmed}'"))
    })?;

    if age < 0 {
        return Err(CoreError::Validation(format!(
            "age must not be negative, got {age}"
        )));
    }
    Ok(age)
}

/// Run the `validator` rules of `value` and convert any failure.
pub fn check<T: Validate>(value: &T) -> Result<(), CoreError> {
    value.validate().map_err(|e| validation_failure(&e))
}

/// Flatten `validator` errors into one human-readable message.
///
/// Field order is sorted so the message is stable across runs.
pub fn validation_failure(errors: &ValidationErrors) -> CoreError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();

    CoreError::Validation(messages.join("; "))
}
