//! Repository for the `dogs` table.

use shelter_core::connection::PageRequest;
use shelter_core::types::DbId;
use sqlx::PgPool;

use super::keyset_clause;
use crate::models::dog::{CreateDogListing, DogListing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, breed, age, description, image_filename, created_at";

/// Provides create / list / delete operations for dog listings.
pub struct DogRepo;

impl DogRepo {
    /// Insert a new dog listing, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDogListing) -> Result<DogListing, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO dogs (name, breed, age, description, image_filename)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let dog = sqlx::query_as::<_, DogListing>(&query)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(input.age)
            .bind(&input.description)
            .bind(&input.image_filename)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(dog)
    }

    /// Find a dog listing by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DogListing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs WHERE id = $1");
        sqlx::query_as::<_, DogListing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every dog listing, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<DogListing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs ORDER BY id ASC");
        sqlx::query_as::<_, DogListing>(&query).fetch_all(pool).await
    }

    /// Delete a dog listing by ID, returning the removed row.
    ///
    /// Returns `None` (and changes nothing) if no row has that ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DogListing>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("DELETE FROM dogs WHERE id = $1 RETURNING {COLUMNS}");
        let removed = sqlx::query_as::<_, DogListing>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(removed)
    }

    /// Number of listings whose photo is stored under `image_filename`.
    pub async fn count_by_image(pool: &PgPool, image_filename: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dogs WHERE image_filename = $1")
            .bind(image_filename)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dogs")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Fetch one connection page in keyset order (see [`PageRequest`]).
    pub async fn page(pool: &PgPool, request: &PageRequest) -> Result<Vec<DogListing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs {}", keyset_clause(request));
        sqlx::query_as::<_, DogListing>(&query)
            .bind(request.after)
            .bind(request.before)
            .bind(request.fetch_limit())
            .fetch_all(pool)
            .await
    }
}
