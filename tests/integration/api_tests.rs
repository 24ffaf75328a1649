use super::*;
use axum::http::{Method, StatusCode};
use serde_json::json;
use storefront_scraper::web::create_router;

#[tokio::test]
async fn test_service_info() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(PRODUCT_PAGE));

    let (status, body) = make_request(app, Method::GET, "/", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let stores = body["supported_stores"].as_array().unwrap();
    assert!(stores.iter().any(|store| store == "MercadoLibre"));
    assert_eq!(stores.last().unwrap(), "cualquier tienda online");
    assert!(body["endpoints"]["POST /api/scrape"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_scrape_requires_url() -> anyhow::Result<()> {
    for body in [json!({}).to_string(), json!({ "url": "  " }).to_string()] {
        let app = create_router(create_test_app_state(PRODUCT_PAGE));
        let (status, response) = make_request(app, Method::POST, "/scrape", Some(body)).await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
        assert_eq!(response["error"], "URL_REQUERIDA");
        assert_eq!(response["message"], "URL es requerida");
    }
    Ok(())
}

#[tokio::test]
async fn test_scrape_without_body_requires_url() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(PRODUCT_PAGE));

    let (status, response) = make_request(app, Method::POST, "/api/scrape", None).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "URL_REQUERIDA");
    Ok(())
}

#[tokio::test]
async fn test_mercadolibre_profile_and_name_cleanup() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(MERCADOLIBRE_PAGE));
    let request = json!({ "url": "https://articulo.mercadolibre.com.mx/MLM-123456-audifonos" });

    let (status, body) =
        make_request(app, Method::POST, "/scrape", Some(request.to_string())).await?;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["platform"], "mercadolibre");
    assert_eq!(data["store"], "MercadoLibre");
    assert_eq!(data["name"], "Audífonos Bluetooth Inalámbricos");
    assert_eq!(data["price"], 1299.0);
    assert_eq!(data["image"], "https://http2.mlstatic.com/D_NQ_NP_123-O.webp");
    Ok(())
}

#[tokio::test]
async fn test_amazon_captcha_reported_with_ok_status() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(AMAZON_CAPTCHA_PAGE));
    let request = json!({ "url": "https://www.amazon.com.mx/dp/B09B8V1LZ3" });

    let (status, body) =
        make_request(app, Method::POST, "/api/scrape", Some(request.to_string())).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "CAPTCHA_DETECTADO");
    assert_eq!(body["message"], "Amazon requiere verificación CAPTCHA");
    Ok(())
}

#[tokio::test]
async fn test_readiness_timeout_is_scraping_error() -> anyhow::Result<()> {
    let mut config = get_test_config();
    config.scraper.ready_selector = "#app-root".to_string();
    let state = storefront_scraper::web::AppState::with_launcher(
        config,
        std::sync::Arc::new(StaticLauncher::new(PRODUCT_PAGE)),
    );
    let app = create_router(state);
    let request = json!({ "url": "https://www.casamoka.mx/cafetera-6" });

    let (status, body) =
        make_request(app, Method::POST, "/scrape", Some(request.to_string())).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "ERROR_SCRAPING");
    assert!(body["message"].as_str().unwrap().contains("#app-root"));
    Ok(())
}

#[tokio::test]
async fn test_debug_without_screenshot_support_fails() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(PRODUCT_PAGE));
    let request = json!({ "url": "https://www.casamoka.mx/cafetera-6" });

    let (status, body) =
        make_request(app, Method::POST, "/api/debug", Some(request.to_string())).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    Ok(())
}
