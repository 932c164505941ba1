//! API Server for Tasklight
//!
//! This is the main entry point for the Rust backend.
//! It provides the task CRUD REST API and the Ollama suggestion passthrough.

mod config;
mod routes;
mod state;

use std::net::SocketAddr;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Using data directory: {:?}", config.data_dir);
    tracing::info!("Ollama endpoint: {}", config.ollama_url);

    // Only the configured frontend may call with credentials; without a
    // configured frontend the layer is fully permissive (no credentials).
    let cors = match &config.frontend_url {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid FRONTEND_URL: {origin}"))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let port = config.port;
    let app_state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::task::router())
        .merge(routes::suggestion::router())
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("REST API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
