use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::AppConfig;
use crate::page::{ChromeLauncher, SessionLauncher};
use crate::scrapers::ProductScraper;
use crate::utils::error::Result;

pub mod handlers;
pub mod responses;

pub use handlers::{debug_snapshot, health_check, scrape_product, service_info, ScrapeRequest};
pub use responses::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub scraper: Arc<ProductScraper>,
    pub launcher: Arc<dyn SessionLauncher>,
}

impl AppState {
    /// State backed by a real headless Chrome per request.
    pub fn new(config: AppConfig) -> Self {
        let launcher = Arc::new(ChromeLauncher::new(config.scraper.clone()));
        Self::with_launcher(config, launcher)
    }

    pub fn with_launcher(config: AppConfig, launcher: Arc<dyn SessionLauncher>) -> Self {
        Self {
            scraper: Arc::new(ProductScraper::new(config.scraper.clone())),
            config: Arc::new(config),
            launcher,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/scrape", post(scrape_product))
        .route("/api/scrape", post(scrape_product))
        .route("/debug", post(debug_snapshot))
        .route("/api/debug", post(debug_snapshot))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
