//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every mutation runs in its own
//! transaction: committed on success, rolled back when dropped on error.

pub mod contact_request_repo;
pub mod dog_repo;

pub use contact_request_repo::ContactRequestRepo;
pub use dog_repo::DogRepo;

use shelter_core::connection::{Direction, PageRequest};

/// Keyset window shared by the connection queries.
///
/// Binds: `$1` = after id, `$2` = before id, `$3` = row limit.
fn keyset_clause(request: &PageRequest) -> &'static str {
    match request.direction {
        Direction::Forward => {
            "WHERE ($1::BIGINT IS NULL OR id > $1) AND ($2::BIGINT IS NULL OR id < $2) \
             ORDER BY id ASC LIMIT $3"
        }
        Direction::Backward => {
            "WHERE ($1::BIGINT IS NULL OR id > $1) AND ($2::BIGINT IS NULL OR id < $2) \
             ORDER BY id DESC LIMIT $3"
        }
    }
}
