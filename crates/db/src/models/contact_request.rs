//! Contact request model and DTOs.

use serde::{Deserialize, Serialize};
use shelter_core::connection::{Node, NodeType};
use shelter_core::types::{DbId, Timestamp};
use shelter_core::validation::{NAME_MAX_LEN, PHONE_MAX_LEN};
use sqlx::FromRow;
use validator::Validate;

// `validator` length bounds are `u64`.
const NAME_MAX_LEN_U64: u64 = NAME_MAX_LEN as u64;
const PHONE_MAX_LEN_U64: u64 = PHONE_MAX_LEN as u64;

/// A row from the `contact_requests` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ContactRequest {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub created_at: Timestamp,
}

impl Node for ContactRequest {
    const NODE_TYPE: NodeType = NodeType::ContactRequest;

    fn node_id(&self) -> DbId {
        self.id
    }
}

/// DTO for a submitted contact form. Also the form body the API extracts.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[validate(length(max = NAME_MAX_LEN_U64, message = "name is too long"))]
    #[serde(default)]
    pub name: String,
    #[validate(length(max = PHONE_MAX_LEN_U64, message = "phone is too long"))]
    #[serde(default)]
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use shelter_core::error::CoreError;
    use shelter_core::validation;

    use super::*;

    #[test]
    fn phone_limit_matches_column_width() {
        let ok = CreateContactRequest {
            name: "n".repeat(NAME_MAX_LEN),
            phone: "9".repeat(PHONE_MAX_LEN),
        };
        assert!(validation::check(&ok).is_ok());

        let too_long = CreateContactRequest {
            phone: "9".repeat(PHONE_MAX_LEN + 1),
            ..ok
        };
        let err = validation::check(&too_long).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref msg) if msg == "phone is too long"));
    }
}
