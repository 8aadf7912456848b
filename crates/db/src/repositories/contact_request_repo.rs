//! Repository for the `contact_requests` table. Rows are insert-only.

use shelter_core::connection::PageRequest;
use shelter_core::types::DbId;
use sqlx::PgPool;

use super::keyset_clause;
use crate::models::contact_request::{ContactRequest, CreateContactRequest};

const COLUMNS: &str = "id, name, phone, created_at";

pub struct ContactRequestRepo;

impl ContactRequestRepo {
    /// Insert a contact request, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactRequest,
    ) -> Result<ContactRequest, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO contact_requests (name, phone)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, ContactRequest>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(request)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_requests WHERE id = $1");
        sqlx::query_as::<_, ContactRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every contact request, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContactRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_requests ORDER BY id ASC");
        sqlx::query_as::<_, ContactRequest>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_requests")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Fetch one connection page in keyset order (see [`PageRequest`]).
    pub async fn page(
        pool: &PgPool,
        request: &PageRequest,
    ) -> Result<Vec<ContactRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_requests {}",
            keyset_clause(request)
        );
        sqlx::query_as::<_, ContactRequest>(&query)
            .bind(request.after)
            .bind(request.before)
            .bind(request.fetch_limit())
            .fetch_all(pool)
            .await
    }
}
