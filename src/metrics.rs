use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, TextEncoder};

/// Handler that serialises Prometheus metrics in text format.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            buffer,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

fn register_counter(name: &str, help: &str) -> IntCounter {
    IntCounter::new(name, help)
        .and_then(|c| {
            prometheus::default_registry().register(Box::new(c.clone()))?;
            Ok(c)
        })
        .unwrap_or_else(|e| {
            tracing::error!("failed to create {name} counter: {e}");
            IntCounter::new(format!("dummy_{name}"), "dummy").expect("dummy counter")
        })
}

/// Counter for successfully created conversation sessions.
static SESSIONS_STARTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "sessions_started_total",
        "Total number of conversation sessions created",
    )
});

/// Counter for handshakes rejected as client errors (validation,
/// unresolved identity/profile, denied authorization).
static HANDSHAKE_REJECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "handshake_rejections_total",
        "Total number of handshakes rejected with a client error",
    )
});

/// Counter for handshakes aborted by infrastructure failures.
static HANDSHAKE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "handshake_failures_total",
        "Total number of handshakes aborted by a server-side failure",
    )
});

#[inline]
pub fn inc_sessions_started() {
    SESSIONS_STARTED_TOTAL.inc();
}

#[inline]
pub fn inc_handshake_rejections() {
    HANDSHAKE_REJECTIONS_TOTAL.inc();
}

#[inline]
pub fn inc_handshake_failures() {
    HANDSHAKE_FAILURES_TOTAL.inc();
}
