use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{error, info};

mod api;
mod config;
mod design;
mod errors;
mod llm;
mod state;
mod utils;

use config::Config;
use design::service::{DesignService, ServiceOptions};
use state::AppState;
use utils::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::load()?;
    let _logging_guards = init_logging(&config.log_level);

    info!("Starting PixelBoxx AI service...");
    info!("Mock responses: {}", config.enable_mock_responses);

    let service = DesignService::new(ServiceOptions::from(&config))?;
    let mock_mode = !service.uses_vendor();
    let state = AppState {
        service: Arc::new(service),
        api_key: config.api_key.clone(),
        anthropic_key_set: !config.anthropic_api_key.trim().is_empty(),
        mock_mode,
    };

    let app = api::router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down PixelBoxx AI service");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
    }
}
