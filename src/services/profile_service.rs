use crate::error::AppError;
use crate::models::Profile;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub struct ProfileService;

impl ProfileService {
    pub async fn find_by_id(
        db: &Pool<Postgres>,
        id: Uuid,
    ) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, visibility, creator_id, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        row.map(|r| Profile::from_row(&r)).transpose().map_err(Into::into)
    }
}
