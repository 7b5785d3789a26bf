use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

/// A single chat session linking a user, a profile and the day's usage
/// record.
///
/// `messages` is nullable on purpose: SQL NULL means "never record
/// messages", while an empty JSON array means "recording enabled, none
/// yet". The two are distinct states and both are observable at the
/// storage layer.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub usage_id: Uuid,
    pub profile_id: Uuid,
    pub customer_id: Option<String>,
    pub logging_enabled: bool,
    pub messages: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            usage_id: row.try_get("usage_id")?,
            profile_id: row.try_get("profile_id")?,
            customer_id: row.try_get("customer_id")?,
            logging_enabled: row.try_get("logging_enabled")?,
            messages: row.try_get("messages")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
