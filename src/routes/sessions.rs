use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::metrics;
use crate::services::session_service::{SessionService, SessionStarted, StartSession};
use crate::state::AppState;

/// Cookie carrying the session credential. HttpOnly, same-origin,
/// path-root; no expiry attribute — the token's internal expiry
/// governs the effective lifetime.
pub const SESSION_COOKIE_NAME: &str = "sessionJwt";

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Opaque long-lived API token of the claimed identity.
    pub token: Option<String>,
    pub email: Option<String>,
    pub profile_id: Option<String>,
    pub enable_logging: Option<bool>,
    /// Attribution-only; stored verbatim.
    pub customer_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateSessionResponse {
    pub message: String,
    pub jwt: String,
}

impl CreateSessionRequest {
    /// Presence check for required fields. Empty strings count as
    /// missing, matching the falsy semantics existing clients rely on.
    fn validate(self) -> Result<StartSession, AppError> {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.trim().is_empty())
        }

        let token = non_empty(self.token);
        let email = non_empty(self.email);
        let profile_id = non_empty(self.profile_id);

        let missing: Vec<&str> = [
            ("token", token.is_none()),
            ("email", email.is_none()),
            ("profileId", profile_id.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(AppError::Validation(missing.join(", ")));
        }

        Ok(StartSession {
            email: email.unwrap(),
            api_token: token.unwrap(),
            profile_id: profile_id.unwrap(),
            enable_logging: self.enable_logging.unwrap_or(false),
            customer_id: self.customer_id,
        })
    }
}

/// Start a conversation session.
///
/// Authenticates the claimed identity, authorizes profile access,
/// resolves today's usage record, creates the conversation and returns
/// the signed credential both as a cookie and in the body.
#[utoipa::path(
    post,
    path = "/api/v1/chat/sessions",
    tag = "chat",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Conversation session created", body = CreateSessionResponse),
        (status = 400, description = "Missing fields, unresolved identity or profile, or access denied"),
        (status = 500, description = "Persistence or signing failure; no detail returned")
    )
)]
pub async fn create_chat_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result: Result<SessionStarted, AppError> = async {
        let request = body.validate()?;
        SessionService::start_session(&state, request).await
    }
    .await;

    let started = match result {
        Ok(started) => {
            metrics::inc_sessions_started();
            started
        }
        Err(err) => {
            if err.status_code() >= 500 {
                metrics::inc_handshake_failures();
            } else {
                metrics::inc_handshake_rejections();
            }
            return Err(err);
        }
    };

    let cookie = format!(
        "{SESSION_COOKIE_NAME}={}; Path=/; HttpOnly",
        started.token
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(CreateSessionResponse {
            message: "conversation session created".into(),
            jwt: started.token,
        }),
    ))
}
