//! User profile row as seen by the notification service.

use beacon_core::notification::RecipientRecord;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct RecipientRow {
    pub id: String,
    pub fcm_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipientRow> for RecipientRecord {
    fn from(row: RecipientRow) -> Self {
        RecipientRecord {
            fcm_token: row.fcm_token,
        }
    }
}
