use crate::error::AppError;
use crate::models::User;
use sqlx::{Pool, Postgres};

pub struct UserService;

impl UserService {
    /// Resolve a claimed identity by exact (email, api_token) match.
    pub async fn find_by_email_and_token(
        db: &Pool<Postgres>,
        email: &str,
        api_token: &str,
    ) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, api_token, role, created_at
            FROM users
            WHERE email = $1 AND api_token = $2
            "#,
        )
        .bind(email)
        .bind(api_token)
        .fetch_optional(db)
        .await?;

        row.map(|r| User::from_row(&r)).transpose().map_err(Into::into)
    }
}
