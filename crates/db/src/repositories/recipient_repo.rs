//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::recipient::RecipientRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, fcm_token, created_at, updated_at";

/// Reads and seeds user push tokens.
pub struct RecipientRepo;

impl RecipientRepo {
    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<RecipientRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, RecipientRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create the user if missing and set its push token.
    pub async fn upsert_token(
        pool: &PgPool,
        id: &str,
        fcm_token: Option<&str>,
    ) -> Result<RecipientRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, fcm_token)
             VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE
                SET fcm_token = EXCLUDED.fcm_token, updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipientRow>(&query)
            .bind(id)
            .bind(fcm_token)
            .fetch_one(pool)
            .await
    }

    /// Remove a user's push token. Returns `false` if the user does not exist.
    pub async fn clear_token(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET fcm_token = NULL, updated_at = now() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
