use crate::error::AppError;
use crate::models::UsageRecord;
use chrono::{Local, NaiveDate};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const SELECT_BY_USER_AND_DAY: &str = r#"
    SELECT id, user_id, day, message_count, token_count
    FROM usage_records
    WHERE user_id = $1 AND day = $2
"#;

pub struct UsageService;

impl UsageService {
    /// Resolve or lazily create the usage record for `user_id` and the
    /// current calendar day.
    ///
    /// "Today" is the server-local date at call time — a service-wide
    /// clock, never caller-supplied.
    pub async fn get_or_create_today(
        db: &Pool<Postgres>,
        user_id: Uuid,
    ) -> Result<UsageRecord, AppError> {
        Self::get_or_create(db, user_id, Local::now().date_naive()).await
    }

    /// Day-injected variant so tests can pin the calendar day.
    pub async fn get_or_create(
        db: &Pool<Postgres>,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<UsageRecord, AppError> {
        if let Some(row) = sqlx::query(SELECT_BY_USER_AND_DAY)
            .bind(user_id)
            .bind(day)
            .fetch_optional(db)
            .await?
        {
            return UsageRecord::from_row(&row).map_err(Into::into);
        }

        // Concurrent first-requests-of-the-day may race here; the
        // UNIQUE (user_id, day) constraint is the arbiter, not this
        // function.
        let inserted = sqlx::query(
            r#"
            INSERT INTO usage_records (id, user_id, day, message_count, token_count)
            VALUES ($1, $2, $3, 0, 0)
            ON CONFLICT (user_id, day) DO NOTHING
            RETURNING id, user_id, day, message_count, token_count
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(day)
        .fetch_optional(db)
        .await?;

        if let Some(row) = inserted {
            return UsageRecord::from_row(&row).map_err(Into::into);
        }

        // Lost the race; the other writer's row exists now.
        let row = sqlx::query(SELECT_BY_USER_AND_DAY)
            .bind(user_id)
            .bind(day)
            .fetch_one(db)
            .await?;
        UsageRecord::from_row(&row).map_err(Into::into)
    }
}
