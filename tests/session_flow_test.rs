//! DB-backed handshake tests.
//!
//! These run against a real Postgres instance and are skipped when
//! DATABASE_URL is not set, so the unit suite stays self-contained.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use chat_session_service::config::Config;
use chat_session_service::error::AppError;
use chat_session_service::models::{Role, Visibility};
use chat_session_service::routes::sessions::{
    create_chat_session, CreateSessionRequest, SESSION_COOKIE_NAME,
};
use chat_session_service::services::session_service::{SessionService, StartSession};
use chat_session_service::services::UsageService;
use chat_session_service::state::AppState;
use jwt_security::SessionTokenIssuer;

const TEST_SECRET: &str = "y9K$mP2vRx#TnZ@s4Yw!cGf7Dh&e3Xa6Wq8Lj5BtNu1Zp0MkYhVgCxFbAsSdQwEr";

async fn test_state() -> Option<AppState> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping DB-backed handshake tests");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to test database");
    chat_session_service::db::MIGRATOR
        .run(&pool)
        .await
        .expect("run migrations");

    let config = Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: url,
        session_jwt_secret: TEST_SECRET.into(),
    };

    Some(AppState {
        db: pool,
        config: Arc::new(config),
        issuer: Arc::new(SessionTokenIssuer::new(TEST_SECRET).expect("issuer")),
    })
}

async fn seed_user(db: &PgPool, role: Role) -> (Uuid, String, String) {
    let id = Uuid::new_v4();
    let email = format!("user-{id}@example.com");
    let api_token = format!("tok-{id}");
    sqlx::query("INSERT INTO users (id, email, api_token, role) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(&email)
        .bind(&api_token)
        .bind(role.as_db())
        .execute(db)
        .await
        .expect("seed user");
    (id, email, api_token)
}

async fn seed_profile(db: &PgPool, visibility: Visibility, creator_id: Uuid) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO profiles (id, name, visibility, creator_id) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind("test profile")
        .bind(visibility.as_db())
        .bind(creator_id)
        .execute(db)
        .await
        .expect("seed profile");
    id
}

fn start_request(email: &str, api_token: &str, profile_id: Uuid) -> StartSession {
    StartSession {
        email: email.into(),
        api_token: api_token.into(),
        profile_id: profile_id.to_string(),
        enable_logging: false,
        customer_id: None,
    }
}

async fn conversation_count(db: &PgPool, user_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM conversations WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(db)
        .await
        .expect("count conversations")
}

#[tokio::test]
async fn handshake_reuses_daily_usage_record_but_creates_fresh_sessions() {
    let Some(state) = test_state().await else {
        return;
    };

    let (user_id, email, token) = seed_user(&state.db, Role::Standard).await;
    let profile_id = seed_profile(&state.db, Visibility::Public, user_id).await;

    let first = SessionService::start_session(&state, start_request(&email, &token, profile_id))
        .await
        .expect("first handshake");
    let second = SessionService::start_session(&state, start_request(&email, &token, profile_id))
        .await
        .expect("second handshake");

    // Two distinct sessions and credentials...
    assert_ne!(first.conversation.id, second.conversation.id);
    assert_ne!(first.token, second.token);

    // ...sharing exactly one usage record for today.
    let usage_rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM usage_records WHERE user_id = $1 AND day = $2",
    )
    .bind(user_id)
    .bind(Local::now().date_naive())
    .fetch_one(&state.db)
    .await
    .expect("count usage records");
    assert_eq!(usage_rows, 1);
    assert_eq!(first.conversation.usage_id, second.conversation.usage_id);

    // Fresh records start with zero counters.
    let usage = UsageService::get_or_create_today(&state.db, user_id)
        .await
        .expect("resolve usage record");
    assert_eq!(usage.message_count, 0);
    assert_eq!(usage.token_count, 0);
}

#[tokio::test]
async fn credential_binds_the_created_conversation_and_expires_in_an_hour() {
    let Some(state) = test_state().await else {
        return;
    };

    let (user_id, email, token) = seed_user(&state.db, Role::Standard).await;
    let profile_id = seed_profile(&state.db, Visibility::Public, user_id).await;

    let started = SessionService::start_session(&state, start_request(&email, &token, profile_id))
        .await
        .expect("handshake");

    assert_eq!(started.expires_in, jwt_security::SESSION_TOKEN_TTL_SECS);

    let claims = state.issuer.verify(&started.token).expect("verify token");
    assert_eq!(
        claims.conversation_id().unwrap(),
        started.conversation.id,
        "credential must name the conversation it was issued for"
    );
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn private_profile_is_denied_to_non_creators_and_writes_nothing() {
    let Some(state) = test_state().await else {
        return;
    };

    let (creator_id, _, _) = seed_user(&state.db, Role::Standard).await;
    let (caller_id, email, token) = seed_user(&state.db, Role::Standard).await;
    let profile_id = seed_profile(&state.db, Visibility::Private, creator_id).await;

    let err = SessionService::start_session(&state, start_request(&email, &token, profile_id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AccessDenied(_)));

    assert_eq!(conversation_count(&state.db, caller_id).await, 0);
}

#[tokio::test]
async fn private_profile_is_allowed_for_its_creator() {
    let Some(state) = test_state().await else {
        return;
    };

    let (creator_id, email, token) = seed_user(&state.db, Role::Standard).await;
    let profile_id = seed_profile(&state.db, Visibility::Private, creator_id).await;

    let started = SessionService::start_session(&state, start_request(&email, &token, profile_id))
        .await
        .expect("creator handshake");
    assert_eq!(started.conversation.profile_id, profile_id);
}

#[tokio::test]
async fn unresolved_identity_or_profile_writes_nothing() {
    let Some(state) = test_state().await else {
        return;
    };

    let (user_id, email, token) = seed_user(&state.db, Role::Standard).await;
    let profile_id = seed_profile(&state.db, Visibility::Public, user_id).await;

    // Wrong token: identity does not resolve.
    let err = SessionService::start_session(
        &state,
        start_request(&email, "wrong-token", profile_id),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::IdentityNotFound));

    // Unknown and unparseable profile ids: profile does not resolve.
    let err = SessionService::start_session(
        &state,
        start_request(&email, &token, Uuid::new_v4()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ProfileNotFound));

    let mut request = start_request(&email, &token, profile_id);
    request.profile_id = "not-a-uuid".into();
    let err = SessionService::start_session(&state, request)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProfileNotFound));

    assert_eq!(conversation_count(&state.db, user_id).await, 0);
}

#[tokio::test]
async fn message_log_is_absent_unless_logging_was_requested() {
    let Some(state) = test_state().await else {
        return;
    };

    let (user_id, email, token) = seed_user(&state.db, Role::Standard).await;
    let profile_id = seed_profile(&state.db, Visibility::Public, user_id).await;

    let mut with_logging = start_request(&email, &token, profile_id);
    with_logging.enable_logging = true;
    let logged = SessionService::start_session(&state, with_logging)
        .await
        .expect("handshake with logging");

    let silent = SessionService::start_session(&state, start_request(&email, &token, profile_id))
        .await
        .expect("handshake without logging");

    // Check the stored column directly: empty array vs SQL NULL.
    let row = sqlx::query("SELECT logging_enabled, messages FROM conversations WHERE id = $1")
        .bind(logged.conversation.id)
        .fetch_one(&state.db)
        .await
        .expect("fetch logged conversation");
    assert!(row.get::<bool, _>("logging_enabled"));
    let messages: Option<serde_json::Value> = row.get("messages");
    assert_eq!(messages, Some(serde_json::json!([])));

    let row = sqlx::query("SELECT logging_enabled, messages FROM conversations WHERE id = $1")
        .bind(silent.conversation.id)
        .fetch_one(&state.db)
        .await
        .expect("fetch silent conversation");
    assert!(!row.get::<bool, _>("logging_enabled"));
    let messages: Option<serde_json::Value> = row.get("messages");
    assert!(messages.is_none(), "message log must be absent, not empty");
}

#[tokio::test]
async fn response_cookie_and_jwt_field_carry_the_same_credential() {
    let Some(state) = test_state().await else {
        return;
    };

    let (user_id, email, token) = seed_user(&state.db, Role::Standard).await;
    let profile_id = seed_profile(&state.db, Visibility::Public, user_id).await;

    let request = CreateSessionRequest {
        token: Some(token),
        email: Some(email),
        profile_id: Some(profile_id.to_string()),
        enable_logging: None,
        customer_id: None,
    };

    let response = create_chat_session(State(state.clone()), Json(request))
        .await
        .expect("handshake over the handler")
        .into_response();
    assert_eq!(response.status(), 200);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie must be set")
        .to_str()
        .expect("cookie is ascii")
        .to_string();
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE_NAME}=")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(
        !cookie.contains("Expires") && !cookie.contains("Max-Age"),
        "cookie lifetime is governed by the token's own expiry"
    );

    let cookie_value = cookie
        .trim_start_matches(&format!("{SESSION_COOKIE_NAME}="))
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    let body: serde_json::Value = serde_json::from_slice(&body).expect("json body");

    assert_eq!(
        body["jwt"].as_str().expect("jwt field"),
        cookie_value,
        "cookie and body must carry byte-identical credentials"
    );

    let claims = state
        .issuer
        .verify(body["jwt"].as_str().unwrap())
        .expect("credential verifies");
    let conversation_id = claims.conversation_id().unwrap();
    let stored =
        chat_session_service::services::ConversationService::find_by_id(&state.db, conversation_id)
            .await
            .expect("lookup conversation")
            .expect("conversation exists");
    assert_eq!(stored.user_id, user_id);
}

#[tokio::test]
async fn customer_id_is_stored_verbatim() {
    let Some(state) = test_state().await else {
        return;
    };

    let (user_id, email, token) = seed_user(&state.db, Role::Standard).await;
    let profile_id = seed_profile(&state.db, Visibility::Public, user_id).await;

    let mut request = start_request(&email, &token, profile_id);
    request.customer_id = Some("acct_12345".into());
    let started = SessionService::start_session(&state, request)
        .await
        .expect("handshake");

    assert_eq!(started.conversation.customer_id.as_deref(), Some("acct_12345"));
}
