use crate::state::AppState;
use axum::response::Html;
use axum::{
    routing::{get, post},
    Json, Router,
};

pub mod sessions;
use sessions::create_chat_session;

// OpenAPI endpoint handler
async fn openapi_json() -> Json<serde_json::Value> {
    use utoipa::OpenApi;
    Json(serde_json::to_value(crate::openapi::ApiDoc::openapi()).unwrap_or_default())
}

// Documentation entry point
async fn docs() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Chat Session Service API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            SwaggerUIBundle({
                url: "/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true,
            });
        };
    </script>
</body>
</html>"#,
    )
}

pub fn build_router() -> Router<AppState> {
    // Service introspection endpoints (no API version prefix)
    let introspection = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/metrics", get(crate::metrics::metrics_handler))
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(docs));

    // API v1 endpoints. The route only accepts POST; the router
    // answers 405 for every other method on the path.
    let api_v1 = Router::new().route("/chat/sessions", post(create_chat_session));

    introspection.merge(Router::new().nest("/api/v1", api_v1))
}
