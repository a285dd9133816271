use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "pixelboxx-ai-service",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness: the service can serve as long as a vendor credential is
/// configured or mock responses are enabled.
pub async fn readiness_check(State(state): State<AppState>) -> Json<Value> {
    let ready = state.anthropic_key_set || state.mock_mode;
    Json(json!({
        "ready": ready,
        "checks": {
            "anthropic_api_key": state.anthropic_key_set,
            "mock_mode": state.mock_mode,
        },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
