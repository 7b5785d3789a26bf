use crate::error::AppError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use error_types::{error_codes, error_types as kinds, ErrorResponse};

/// Map domain errors to HTTP responses.
///
/// Server-side failures never leak their cause to the caller: the body
/// carries a generic message and the concrete error goes to the log.
pub fn map_error(err: &AppError) -> (StatusCode, ErrorResponse) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let (error_type, code) = match err {
        AppError::Validation(_) => (kinds::VALIDATION_ERROR, error_codes::MISSING_REQUIRED_FIELD),
        AppError::IdentityNotFound => (kinds::NOT_FOUND_ERROR, error_codes::IDENTITY_NOT_FOUND),
        AppError::ProfileNotFound => (kinds::NOT_FOUND_ERROR, error_codes::PROFILE_NOT_FOUND),
        AppError::AccessDenied(_) => {
            (kinds::AUTHORIZATION_ERROR, error_codes::PROFILE_NOT_ACCESSIBLE)
        }
        AppError::Database(_) => (kinds::SERVER_ERROR, error_codes::DATABASE_ERROR),
        AppError::TokenSigning(_) => (kinds::SERVER_ERROR, error_codes::TOKEN_SIGNING_FAILED),
        AppError::Config(_) | AppError::StartServer(_) | AppError::Internal => {
            (kinds::SERVER_ERROR, error_codes::INTERNAL_SERVER_ERROR)
        }
    };

    let message = if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
        "internal server error - please try again later".to_string()
    } else {
        err.to_string()
    };

    let label = match status {
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
        _ => "Error",
    };

    let response = ErrorResponse::new(label, &message, status.as_u16(), error_type, code);
    (status, response)
}

pub fn into_response(err: AppError) -> impl IntoResponse {
    let (status, response) = map_error(&err);
    (status, Json(response))
}
