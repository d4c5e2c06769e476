//! HTTP gateway
//!
//! Wires the API routes, static files, CORS and request tracing into an axum
//! [`Router`] and runs it.

pub mod handlers;
pub mod response;

use std::path::Path;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{Config, ServerConfig};
use crate::error::{FlashgateError, Result};
use crate::providers::create_provider;
use crate::request::RequestBuilder;

/// Shared handler state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Builds and sends provider requests
    pub builder: RequestBuilder,
}

/// Routes served under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-text", post(handlers::generate_text))
        .route("/file-processing", post(handlers::file_processing))
        .route("/chat", post(handlers::chat))
}

/// Build the full application router
///
/// Static files are served from `config.static_dir` only when it is an
/// existing directory.
pub fn build_router(builder: RequestBuilder, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(AppState { builder });

    if Path::new(&config.static_dir).is_dir() {
        tracing::info!("Serving static files from {}", config.static_dir);
        app = app.fallback_service(ServeDir::new(&config.static_dir));
    }

    if config.cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http())
}

/// Run the gateway until Ctrl-C
///
/// # Errors
///
/// Returns error if the provider cannot be created, the address cannot be
/// bound, or the server fails
pub async fn serve(config: Config) -> Result<()> {
    let provider = create_provider(&config.provider)?;
    let builder = RequestBuilder::new(Arc::from(provider));
    let app = build_router(builder, &config.server);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| FlashgateError::Config(format!("Failed to bind {}: {}", address, e)))?;

    tracing::info!(
        "Gemini gateway running at http://{} (model={})",
        address,
        config.provider.model
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
