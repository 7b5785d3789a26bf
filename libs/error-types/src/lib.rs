//! Shared API error vocabulary.
//!
//! Every failure surfaced over HTTP uses the same [`ErrorResponse`]
//! wire shape, so clients can route on `error_type`/`code` without
//! parsing free-form messages.

use serde::{Deserialize, Serialize};

/// Unified API error response format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short, human-readable status label ("Bad Request", ...).
    pub error: String,

    /// User-facing message.
    pub message: String,

    /// HTTP status code.
    pub status: u16,

    /// Error class for client-side routing (see [`error_types`]).
    pub error_type: String,

    /// Stable machine-readable code (see [`error_codes`]).
    pub code: String,

    /// Optional detail, only populated in development environments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Request trace id for log correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,

    /// ISO 8601 timestamp.
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, status: u16, error_type: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status,
            error_type: error_type.to_string(),
            code: code.to_string(),
            details: None,
            trace_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_trace_id(mut self, trace_id: String) -> Self {
        self.trace_id = Some(trace_id);
        self
    }
}

/// Stable error codes for the session handshake service.
pub mod error_codes {
    // Request validation
    pub const MISSING_REQUIRED_FIELD: &str = "MISSING_REQUIRED_FIELD";

    // Resolution
    pub const IDENTITY_NOT_FOUND: &str = "IDENTITY_NOT_FOUND";
    pub const PROFILE_NOT_FOUND: &str = "PROFILE_NOT_FOUND";

    // Authorization
    pub const PROFILE_NOT_ACCESSIBLE: &str = "PROFILE_NOT_ACCESSIBLE";

    // Infrastructure
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const TOKEN_SIGNING_FAILED: &str = "TOKEN_SIGNING_FAILED";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// Error classes for client-side routing.
pub mod error_types {
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const NOT_FOUND_ERROR: &str = "not_found_error";
    pub const AUTHORIZATION_ERROR: &str = "authorization_error";
    pub const SERVER_ERROR: &str = "server_error";
}
