use crate::error::AppError;
use crate::models::Conversation;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const CONVERSATION_COLUMNS: &str =
    "id, user_id, usage_id, profile_id, customer_id, logging_enabled, messages, created_at";

pub struct ConversationService;

impl ConversationService {
    /// Persist a new conversation.
    ///
    /// `customer_id` is stored verbatim — it attributes downstream
    /// billing and is not checked against any registry. `messages` is
    /// initialized to an empty array only when logging is enabled;
    /// otherwise the column stays NULL ("never record").
    pub async fn create(
        db: &Pool<Postgres>,
        user_id: Uuid,
        usage_id: Uuid,
        profile_id: Uuid,
        customer_id: Option<&str>,
        logging_enabled: bool,
    ) -> Result<Conversation, AppError> {
        let messages: Option<serde_json::Value> =
            logging_enabled.then(|| serde_json::Value::Array(Vec::new()));

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO conversations
                (id, user_id, usage_id, profile_id, customer_id, logging_enabled, messages)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CONVERSATION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(usage_id)
        .bind(profile_id)
        .bind(customer_id)
        .bind(logging_enabled)
        .bind(messages)
        .fetch_one(db)
        .await?;

        Conversation::from_row(&row).map_err(Into::into)
    }

    /// Look a conversation up by id.
    ///
    /// Credentials outlive conversation deletion, so consumers gating
    /// protected access must call this on every request rather than
    /// trusting an unexpired token alone.
    pub async fn find_by_id(
        db: &Pool<Postgres>,
        id: Uuid,
    ) -> Result<Option<Conversation>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        row.map(|r| Conversation::from_row(&r))
            .transpose()
            .map_err(Into::into)
    }
}
