use std::time::Duration;
use storefront_scraper::{
    extraction::{ExtractionPipeline, PageContext},
    page::StaticPage,
    platform, ProductScraper,
};

use super::*;

fn scraper() -> ProductScraper {
    ProductScraper::new(get_test_config().scraper)
}

#[test]
fn test_generic_page_through_scraper() {
    let mut page = StaticPage::new("about:blank", PRODUCT_PAGE);
    let product = scraper()
        .scrape(&mut page, "https://www.casamoka.mx/cafetera-6")
        .unwrap();

    assert_eq!(product.price, 649.0);
    assert_eq!(product.store, "Casamoka");
}

#[test]
fn test_meta_price_overrides_structured_data() {
    let html = r#"
        <html><head>
            <meta property="product:price:amount" content="1.499,00">
            <script type="application/ld+json">
                {"@type": "Product", "name": "Licuadora", "offers": {"price": "1299.00"}}
            </script>
        </head><body><span class="price">$999.00</span></body></html>
    "#;
    let mut page = StaticPage::new("about:blank", html);
    let product = scraper()
        .scrape(&mut page, "https://www.liverpool.com.mx/tienda/pdp/licuadora")
        .unwrap();

    assert_eq!(product.platform, "liverpool");
    assert_eq!(product.store, "Liverpool");
    assert_eq!(product.name, "Licuadora");
    assert_eq!(product.price, 1499.0);
}

#[test]
fn test_title_fallback_when_nothing_matches() {
    let html = "<html><head><title>Set de sartenes - Ofertas | Cocina Feliz</title></head><body></body></html>";
    let mut page = StaticPage::new("about:blank", html);
    let product = scraper()
        .scrape(&mut page, "https://cocinafeliz.mx/p/sartenes")
        .unwrap();

    assert_eq!(product.name, "Set de sartenes");
    assert_eq!(product.price, 0.0);
    assert_eq!(product.image, "");
}

#[test]
fn test_usd_platform_profile() {
    let mut page = StaticPage::new("about:blank", "<html><body></body></html>");
    let product = scraper()
        .scrape(&mut page, "https://es.aliexpress.com/item/100500.html")
        .unwrap();

    assert_eq!(product.platform, "aliexpress");
    assert_eq!(product.currency, "USD");
    assert_eq!(product.store, "AliExpress");
}

#[test]
fn test_pipeline_run_twice_is_stable() {
    let page = StaticPage::new("https://www.casamoka.mx/cafetera-6", PRODUCT_PAGE);
    let ctx = PageContext::new(&page);
    let (_, profile) = platform::detect(ctx.url());
    let pipeline = ExtractionPipeline::new(Duration::ZERO);

    let first = pipeline.run(&ctx, &profile);
    let second = pipeline.run(&ctx, &profile);

    assert_eq!(first, second);
}
