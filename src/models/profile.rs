use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// A character profile users converse with. Immutable from the
/// handshake's perspective.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub visibility: Visibility,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let visibility_str: String = row.try_get("visibility")?;
        let visibility = Visibility::from_db(&visibility_str).ok_or_else(|| {
            sqlx::Error::Decode(format!("invalid visibility: {visibility_str}").into())
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            visibility,
            creator_id: row.try_get("creator_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
