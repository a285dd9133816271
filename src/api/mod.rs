pub mod design;
pub mod health;

use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const OPEN_PATHS: [&str; 3] = ["/", "/health", "/health/ready"];

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/design/from-image", post(design::design_from_image))
        .route("/design/from-description", post(design::design_from_description))
        .route("/design/health", get(design::design_health))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "PixelBoxx AI Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "health": "/health",
    }))
}

/// Internal API key check. Health endpoints stay open; everything else
/// requires a matching x-api-key header whenever a key is configured.
async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.api_key.is_empty() || OPEN_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());
    if provided != Some(state.api_key.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid or missing API key" })),
        )
            .into_response();
    }

    next.run(request).await
}
