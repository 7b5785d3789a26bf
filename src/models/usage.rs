use chrono::NaiveDate;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

/// Per-user, per-calendar-day usage counters.
///
/// At most one row exists per (user_id, day); the storage layer
/// enforces this with a UNIQUE constraint. Counters start at zero and
/// are advanced outside the handshake.
#[derive(Debug, Clone, Serialize)]
pub struct UsageRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub day: NaiveDate,
    pub message_count: i64,
    pub token_count: i64,
}

impl UsageRecord {
    pub fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            day: row.try_get("day")?,
            message_count: row.try_get("message_count")?,
            token_count: row.try_get("token_count")?,
        })
    }
}
