use crate::config::Config;
use jwt_security::SessionTokenIssuer;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub issuer: Arc<SessionTokenIssuer>,
}
