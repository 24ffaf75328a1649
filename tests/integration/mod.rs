// Shared fixtures for the integration suite: every page is served from
// in-memory HTML so no browser is needed.

pub mod api_tests;
pub mod pipeline_tests;

use axum::{
    body::Body,
    http::{Method, Request},
};
use std::sync::Arc;
use storefront_scraper::{
    config::{AppConfig, ScraperConfig, ServerConfig},
    page::{PageAccessor, SessionLauncher, StaticPage},
    utils::error::Result,
    web::AppState,
};
use tower::ServiceExt;

/// Opens a [`StaticPage`] over fixed HTML for every session.
pub struct StaticLauncher {
    html: String,
}

impl StaticLauncher {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl SessionLauncher for StaticLauncher {
    fn open(&self) -> Result<Box<dyn PageAccessor>> {
        Ok(Box::new(StaticPage::new("about:blank", self.html.clone())))
    }
}

/// Test configuration for integration tests
pub fn get_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        scraper: ScraperConfig {
            settle_delay_ms: 0,
            page_load_timeout_secs: 1,
            ..ScraperConfig::default()
        },
    }
}

pub fn create_test_app_state(html: &str) -> AppState {
    AppState::with_launcher(get_test_config(), Arc::new(StaticLauncher::new(html)))
}

/// Send one request through the router and decode the JSON body.
pub async fn make_request(
    app: axum::Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> anyhow::Result<(axum::http::StatusCode, serde_json::Value)> {
    let mut request = Request::builder().method(method).uri(uri);

    if body.is_some() {
        request = request.header("content-type", "application/json");
    }

    let request = request.body(Body::from(body.unwrap_or_default()))?;
    let response = app.oneshot(request).await?;
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, json))
}

pub const PRODUCT_PAGE: &str = r#"
<html>
<head>
    <title>Cafetera Italiana 6 tazas | Casa Moka</title>
    <meta property="og:title" content="Cafetera Italiana 6 tazas | Casa Moka">
    <meta property="og:image" content="https://cdn.casamoka.mx/cafetera.jpg">
    <script type="application/ld+json">
    {
        "@context": "https://schema.org",
        "@type": "Product",
        "name": "Cafetera Italiana",
        "offers": {"@type": "Offer", "price": "649.00", "priceCurrency": "MXN"}
    }
    </script>
</head>
<body>
    <h1 class="product-title">Cafetera Italiana 6 tazas</h1>
    <span class="price">$699.00</span>
</body>
</html>
"#;

pub const MERCADOLIBRE_PAGE: &str = r#"
<html>
<head><title>Audífonos Bluetooth Inalámbricos | MercadoLibre</title></head>
<body>
    <h1 class="ui-pdp-title">Audífonos Bluetooth Inalámbricos ✓</h1>
    <figure class="ui-pdp-gallery__figure">
        <img src="https://http2.mlstatic.com/D_NQ_NP_123-O.webp">
    </figure>
    <div class="ui-pdp-price">
        <span class="andes-money-amount__fraction">1,299</span>
    </div>
</body>
</html>
"#;

pub const AMAZON_CAPTCHA_PAGE: &str = r#"
<html>
<head><title>Amazon.com.mx</title></head>
<body>
    <h4>Escriba los caracteres que ve a continuación</h4>
    <form method="get" action="/errors/validateCaptcha"></form>
</body>
</html>
"#;
