// Integration tests for the storefront scraper
//
// These exercise the router, the platform scrapers and the extraction
// pipeline together over in-memory pages.

mod integration;

use axum::http::{Method, StatusCode};
use integration::*;
use storefront_scraper::web::create_router;

#[tokio::test]
async fn test_system_health() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(PRODUCT_PAGE));

    let (status, body) = make_request(app, Method::GET, "/health", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_generic_store() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(PRODUCT_PAGE));
    let request = serde_json::json!({ "url": "https://www.casamoka.mx/cafetera-6" });

    let (status, body) =
        make_request(app, Method::POST, "/api/scrape", Some(request.to_string())).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["url"], "https://www.casamoka.mx/cafetera-6");
    assert_eq!(data["platform"], "generic");
    assert_eq!(data["store"], "Casamoka");
    assert_eq!(data["currency"], "MXN");
    // The meta title wins over JSON-LD and the heading.
    assert_eq!(data["name"], "Cafetera Italiana 6 tazas | Casa Moka");
    // No meta price, so JSON-LD supplies it before the CSS fallback.
    assert_eq!(data["price"], 649.0);
    assert_eq!(data["image"], "https://cdn.casamoka.mx/cafetera.jpg");
    assert!(data["scrapedAt"].is_string());
    Ok(())
}
