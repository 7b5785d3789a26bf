use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use chat_session_service::{config::Config, db, error::AppError, logging, routes, state::AppState};
use jwt_security::SessionTokenIssuer;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logging::init_tracing();
    let cfg = Arc::new(Config::from_env()?);

    // Connect-or-fail; embedded migrations run before the first request.
    let db = db::init_pool(&cfg.database_url)
        .await
        .map_err(|e| AppError::StartServer(format!("db: {e}")))?;

    tracing::info!("database pool initialized");

    // The signing secret is validated here so a misconfigured process
    // never reaches the point of issuing unverifiable credentials.
    let issuer = SessionTokenIssuer::new(&cfg.session_jwt_secret)
        .map(Arc::new)
        .map_err(|e| AppError::StartServer(format!("session token issuer: {e}")))?;

    let state = AppState {
        db,
        config: cfg.clone(),
        issuer,
    };

    let app = routes::build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| AppError::StartServer(format!("bind address: {e}")))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::StartServer(format!("bind: {e}")))?;

    tracing::info!(%addr, "starting chat-session-service");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::StartServer(e.to_string()))?;

    Ok(())
}
