use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("ANTHROPIC_API_KEY is not set and mock responses are disabled")]
    Configuration,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            ServiceError::Configuration => {
                error!("Configuration error reached the request path");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Service is misconfigured" })),
                )
                    .into_response()
            }
            ServiceError::Unexpected(err) => {
                error!("Unexpected error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "An unexpected error occurred" })),
                )
                    .into_response()
            }
        }
    }
}
