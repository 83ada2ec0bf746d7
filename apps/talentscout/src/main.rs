mod candidate;
mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::InferenceClient;
use crate::routes::build_router;
use crate::session::store::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing HF_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentScout v{}", env!("CARGO_PKG_VERSION"));

    // Initialize inference client
    let inference = InferenceClient::new(
        config.inference_api_url.clone(),
        config.inference_api_key.clone(),
        Duration::from_secs(config.inference_timeout_secs),
    )?;
    info!("Inference client initialized (endpoint: {})", inference.api_url());
    info!(
        "Question batches: {}..={} questions, failure policy {:?}",
        config.min_questions, config.max_questions, config.batch_failure_policy
    );

    // Build app state
    let state = AppState {
        sessions: SessionStore::new(),
        generator: Arc::new(inference),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the form front-end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
