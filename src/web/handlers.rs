use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{ApiError, ApiResponse, AppState};
use crate::debug::{capture_debug_snapshot, DebugSnapshot};
use crate::platform::supported_stores;
use crate::scrapers::ScrapedProduct;
use crate::utils::error::{AppError, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: Option<String>,
}

impl ScrapeRequest {
    fn into_url(payload: Option<Json<ScrapeRequest>>) -> std::result::Result<String, ApiError> {
        payload
            .and_then(|Json(request)| request.url)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(ApiError::url_required)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DebugResponse {
    pub success: bool,
    #[serde(flatten)]
    pub snapshot: DebugSnapshot,
}

pub async fn service_info() -> Json<Value> {
    let mut stores: Vec<&str> = supported_stores();
    stores.push("cualquier tienda online");

    Json(json!({
        "status": "ok",
        "service": "Storefront Scraper API",
        "version": env!("CARGO_PKG_VERSION"),
        "supported_stores": stores,
        "endpoints": {
            "POST /api/scrape": "Scrape product from any URL",
            "POST /scrape": "Alias for /api/scrape",
            "POST /api/debug": "Get screenshot and debug info",
            "POST /debug": "Alias for /api/debug"
        }
    }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "storefront-scraper"
    }))
}

pub async fn scrape_product(
    State(state): State<AppState>,
    payload: Option<Json<ScrapeRequest>>,
) -> std::result::Result<Json<ApiResponse<ScrapedProduct>>, ApiError> {
    let url = ScrapeRequest::into_url(payload)?;
    tracing::info!(url = %url, "Scrape requested");

    let scraper = state.scraper.clone();
    let launcher = state.launcher.clone();
    let product = run_blocking(move || {
        let mut page = launcher.open()?;
        scraper.scrape(page.as_mut(), &url)
    })
    .await
    .inspect_err(|e| tracing::error!(error = %e, "Scrape failed"))?;

    tracing::info!(
        platform = %product.platform,
        price = product.price,
        "Scrape completed"
    );
    Ok(Json(ApiResponse::success(product)))
}

pub async fn debug_snapshot(
    State(state): State<AppState>,
    payload: Option<Json<ScrapeRequest>>,
) -> std::result::Result<Json<DebugResponse>, ApiError> {
    let url = ScrapeRequest::into_url(payload)?;

    let launcher = state.launcher.clone();
    let settle_delay = state.config.scraper.settle_delay();
    let snapshot = run_blocking(move || {
        let mut page = launcher.open()?;
        capture_debug_snapshot(page.as_mut(), &url, settle_delay)
    })
    .await
    .inspect_err(|e| tracing::error!(error = %e, "Debug capture failed"))?;

    Ok(Json(DebugResponse {
        success: true,
        snapshot,
    }))
}

/// Page sessions block, so each one runs on the blocking pool and is dropped
/// there when the closure returns.
async fn run_blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?
}
