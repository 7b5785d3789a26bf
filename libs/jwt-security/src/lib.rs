//! Session credential issuance.
//!
//! Signs short-lived HS256 tokens that bind a conversation identifier.
//! The signing secret is injected at construction time and validated
//! for strength there, so a misconfigured process fails before it can
//! issue unverifiable tokens.
//!
//! Tokens are stateless: there is no revocation list, and a credential
//! stays valid until its expiry even if the conversation it names is
//! deleted. Consumers that need revocation semantics must re-check
//! conversation existence on every protected access.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

mod secret;

pub use secret::SecretStrength;

/// Session credentials expire one hour after issuance.
pub const SESSION_TOKEN_TTL_SECS: i64 = 3600;

const VALIDATION_LEEWAY_SECS: u64 = 30; // clock skew tolerance

#[derive(Debug, Error)]
pub enum IssuerError {
    #[error("signing secret rejected: {0}")]
    WeakSecret(&'static str),

    #[error("failed to sign session token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("session token rejected: {0}")]
    Verify(String),
}

/// Claims carried by a session credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Conversation identifier the credential is bound to.
    pub sub: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiry (Unix timestamp), `iat + SESSION_TOKEN_TTL_SECS`.
    pub exp: i64,
    /// Unique token identifier.
    pub jti: String,
}

impl SessionClaims {
    pub fn conversation_id(&self) -> Result<Uuid, IssuerError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| IssuerError::Verify("subject is not a conversation id".into()))
    }
}

/// A freshly signed credential.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Signs and verifies session credentials with a process-wide secret.
pub struct SessionTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionTokenIssuer {
    /// Build an issuer from an explicit secret.
    ///
    /// Rejects secrets shorter than 32 bytes or with low entropy, so
    /// startup fails instead of the first request.
    pub fn new(signing_secret: &str) -> Result<Self, IssuerError> {
        if secret::classify(signing_secret) == SecretStrength::Weak {
            return Err(IssuerError::WeakSecret(
                "secret must be at least 32 bytes of high-entropy data",
            ));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(signing_secret.as_bytes()),
            decoding: DecodingKey::from_secret(signing_secret.as_bytes()),
        })
    }

    /// Sign a credential for a newly created conversation.
    pub fn issue(&self, conversation_id: Uuid) -> Result<IssuedToken, IssuerError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: conversation_id.to_string(),
            iat: now,
            exp: now + SESSION_TOKEN_TTL_SECS,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(IssuerError::Sign)?;

        Ok(IssuedToken {
            token,
            expires_in: SESSION_TOKEN_TTL_SECS,
        })
    }

    /// Validate a credential and return its claims.
    ///
    /// Validity is determined purely by signature and expiry; nothing
    /// is looked up server-side.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, IssuerError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = VALIDATION_LEEWAY_SECS;
        validation.validate_exp = true;

        let data = decode::<SessionClaims>(token, &self.decoding, &validation)
            .map_err(|e| IssuerError::Verify(e.to_string()))?;

        if data.claims.jti.trim().is_empty() {
            return Err(IssuerError::Verify("missing jti claim".into()));
        }

        Ok(data.claims)
    }
}
