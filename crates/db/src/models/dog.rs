//! Dog listing model and DTOs.

use serde::{Deserialize, Serialize};
use shelter_core::connection::{Node, NodeType};
use shelter_core::types::{DbId, Timestamp};
use shelter_core::validation::{BREED_MAX_LEN, IMAGE_FILENAME_MAX_LEN, NAME_MAX_LEN};
use sqlx::FromRow;
use validator::Validate;

// `validator` length bounds are `u64`.
const BREED_MAX_LEN_U64: u64 = BREED_MAX_LEN as u64;
const IMAGE_FILENAME_MAX_LEN_U64: u64 = IMAGE_FILENAME_MAX_LEN as u64;
const NAME_MAX_LEN_U64: u64 = NAME_MAX_LEN as u64;

/// A row from the `dogs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DogListing {
    pub id: DbId,
    pub name: String,
    pub breed: String,
    pub age: i32,
    pub description: String,
    /// Bare filename inside the upload directory, never a path.
    pub image_filename: String,
    pub created_at: Timestamp,
}

impl Node for DogListing {
    const NODE_TYPE: NodeType = NodeType::DogListing;

    fn node_id(&self) -> DbId {
        self.id
    }
}

/// DTO for inserting a dog listing once its photo has been stored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDogListing {
    #[validate(length(max = NAME_MAX_LEN_U64, message = "name is too long"))]
    pub name: String,
    #[validate(length(max = BREED_MAX_LEN_U64, message = "breed is too long"))]
    pub breed: String,
    pub age: i32,
    pub description: String,
    #[validate(length(max = IMAGE_FILENAME_MAX_LEN_U64, message = "image filename is too long"))]
    pub image_filename: String,
}

#[cfg(test)]
mod tests {
    use shelter_core::validation;

    use super::*;

    fn input() -> CreateDogListing {
        CreateDogListing {
            name: "Rex".into(),
            breed: "Beagle".into(),
            age: 2,
            description: "Curious".into(),
            image_filename: "rex.png".into(),
        }
    }

    #[test]
    fn limits_accept_values_at_column_width() {
        let dog = CreateDogListing {
            name: "n".repeat(NAME_MAX_LEN),
            breed: "b".repeat(BREED_MAX_LEN),
            image_filename: format!("{}.png", "i".repeat(IMAGE_FILENAME_MAX_LEN - 4)),
            ..input()
        };
        assert!(validation::check(&dog).is_ok());
    }

    #[test]
    fn limits_reject_values_past_column_width() {
        let dog = CreateDogListing {
            breed: "b".repeat(BREED_MAX_LEN + 1),
            ..input()
        };
        assert!(validation::check(&dog).is_err());

        let dog = CreateDogListing {
            name: "n".repeat(NAME_MAX_LEN + 1),
            ..input()
        };
        assert!(validation::check(&dog).is_err());
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let dog = CreateDogListing {
            name: "ñ".repeat(NAME_MAX_LEN),
            ..input()
        };
        assert!(validation::check(&dog).is_ok());
    }
}
