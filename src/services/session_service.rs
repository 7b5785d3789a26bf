//! The conversation-session factory.
//!
//! Composes identity resolution, profile authorization, the daily
//! usage ledger and credential issuance into one strictly sequential
//! unit of work. No step is retried and no transaction spans the
//! chain: a usage record committed before a later failure is valid and
//! will be reused by the next handshake that day.

use crate::error::AppError;
use crate::models::Conversation;
use crate::services::{
    authorization, ConversationService, ProfileService, UsageService, UserService,
};
use crate::state::AppState;
use uuid::Uuid;

/// A validated handshake request.
#[derive(Debug, Clone)]
pub struct StartSession {
    pub email: String,
    pub api_token: String,
    /// Raw profile identifier from the request; resolved here.
    pub profile_id: String,
    pub enable_logging: bool,
    pub customer_id: Option<String>,
}

/// Outcome of a successful handshake.
#[derive(Debug)]
pub struct SessionStarted {
    pub conversation: Conversation,
    pub token: String,
    pub expires_in: i64,
}

pub struct SessionService;

impl SessionService {
    /// Run the handshake. Preconditions fail in order, each with its
    /// own error: identity resolves → profile resolves → authorization
    /// passes. Only then are records written and a credential signed.
    ///
    /// Single-shot and non-idempotent: calling twice with identical
    /// parameters creates two conversations and two credentials (but
    /// still at most one usage record per day).
    pub async fn start_session(
        state: &AppState,
        request: StartSession,
    ) -> Result<SessionStarted, AppError> {
        let user =
            UserService::find_by_email_and_token(&state.db, &request.email, &request.api_token)
                .await?
                .ok_or(AppError::IdentityNotFound)?;

        // An id that does not parse cannot name an existing profile.
        let profile_id =
            Uuid::parse_str(request.profile_id.trim()).map_err(|_| AppError::ProfileNotFound)?;
        let profile = ProfileService::find_by_id(&state.db, profile_id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;

        authorization::authorize_profile_access(&user, &profile)?;

        // The usage record must exist before the conversation that
        // references it; these two writes are sequenced, not atomic.
        let usage = UsageService::get_or_create_today(&state.db, user.id).await?;

        let conversation = ConversationService::create(
            &state.db,
            user.id,
            usage.id,
            profile.id,
            request.customer_id.as_deref(),
            request.enable_logging,
        )
        .await?;

        let issued = state.issuer.issue(conversation.id)?;

        tracing::info!(
            user_id = %user.id,
            profile_id = %profile.id,
            conversation_id = %conversation.id,
            "conversation session created"
        );

        Ok(SessionStarted {
            conversation,
            token: issued.token,
            expires_in: issued.expires_in,
        })
    }
}
