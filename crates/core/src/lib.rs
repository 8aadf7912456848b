//! Domain logic for the adoption service.
//!
//! Everything here is independent of HTTP and of the database driver:
//! error taxonomy, form validation, upload filename rules and the encoding
//! used by the read-only query surface.

pub mod connection;
pub mod error;
pub mod types;
pub mod uploads;
pub mod validation;
