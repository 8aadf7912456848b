//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO carrying the `validator` length rules for inserts

pub mod contact_request;
pub mod dog;
