use crate::middleware::error_handling;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_handling::into_response(self).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("server start failure: {0}")]
    StartServer(String),

    #[error("missing required field(s): {0}")]
    Validation(String),

    #[error("no user matched the supplied email and api token")]
    IdentityNotFound,

    #[error("profile does not exist")]
    ProfileNotFound,

    #[error("{0}")]
    AccessDenied(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("token signing failed: {0}")]
    TokenSigning(String),

    #[error("internal server error")]
    Internal,
}

impl From<jwt_security::IssuerError> for AppError {
    fn from(e: jwt_security::IssuerError) -> Self {
        AppError::TokenSigning(e.to_string())
    }
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Unresolved identities/profiles and denied authorization are all
    /// surfaced as 400, not 404/403: existing clients treat every
    /// precondition failure as a bad request.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_)
            | AppError::IdentityNotFound
            | AppError::ProfileNotFound
            | AppError::AccessDenied(_) => 400,
            AppError::Config(_)
            | AppError::StartServer(_)
            | AppError::Database(_)
            | AppError::TokenSigning(_)
            | AppError::Internal => 500,
        }
    }
}
