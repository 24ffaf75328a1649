//! Selector and pattern tables consulted by the default pipeline, in
//! priority order.

pub const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

pub const NAME_SELECTORS: &[&str] = &[
    "h1.product-title",
    "h1.product-name",
    "h1.pdp-title",
    r#"h1[class*="title"]"#,
    r#"h1[class*="name"]"#,
    r#"h1[class*="product"]"#,
    ".product-title h1",
    ".product-name h1",
    "#productTitle",
    "#product-title",
    "#title",
    r#"[data-testid="product-title"]"#,
    ".ui-pdp-title",
    ".product__title",
    "h1",
];

pub const PRICE_SELECTORS: &[&str] = &[
    ".price-current",
    ".current-price",
    ".final-price",
    ".sale-price",
    ".price--current",
    ".price-value",
    ".product-price",
    r#"[data-testid="price"]"#,
    "[data-price]",
    ".price",
    ".precio",
    ".product__price",
    ".pdp-price",
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    ".a-price .a-offscreen",
    ".a-price-whole",
    ".andes-money-amount__fraction",
    ".price-tag-fraction",
    ".product-price__price",
    ".price-info__price",
    r#"[class*="price"]"#,
    r#"[class*="precio"]"#,
    r#"span[class*="price"]"#,
    r#"div[class*="price"]"#,
];

pub const IMAGE_SELECTORS: &[&str] = &[
    ".product-image img",
    ".pdp-image img",
    ".gallery-image img",
    "#landingImage",
    "#imgBlkFront",
    "#main-image",
    ".ui-pdp-image",
    ".ui-pdp-gallery__figure img",
    r#"[data-testid="product-image"]"#,
    "[data-zoom]",
    ".product__photo img",
    ".primary-image",
    r#"img[class*="product"]"#,
    r#"img[class*="gallery"]"#,
];

/// Inline price patterns; capture group 1 holds the amount.
pub const RAW_PRICE_PATTERNS: &[&str] = &[
    r#""price"\s*:\s*"?([\d,.]+)"?"#,
    r#""salePrice"\s*:\s*"?([\d,.]+)"?"#,
    r#""currentPrice"\s*:\s*"?([\d,.]+)"?"#,
    r#""offerPrice"\s*:\s*"?([\d,.]+)"?"#,
    r#""finalPrice"\s*:\s*"?([\d,.]+)"?"#,
    r#"data-price="([\d,.]+)""#,
];
