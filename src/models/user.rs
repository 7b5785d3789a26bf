use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Standard,
}

impl Role {
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "standard" => Some(Role::Standard),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Standard => "standard",
        }
    }
}

/// A user account, resolved by (email, api_token) equality.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Opaque long-lived credential; never serialized outward.
    #[serde(skip_serializing)]
    pub api_token: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let role_str: String = row.try_get("role")?;
        let role = Role::from_db(&role_str)
            .ok_or_else(|| sqlx::Error::Decode(format!("invalid role: {role_str}").into()))?;

        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            api_token: row.try_get("api_token")?,
            role,
            created_at: row.try_get("created_at")?,
        })
    }
}
