use super::PlatformScraper;
use crate::extraction::{ExtractionResult, PageContext};
use crate::page::PageAccessor;
use crate::platform::StoreProfile;
use crate::price::{extract_price_from_text, is_plausible_price};
use crate::utils::error::{AppError, Result};

const PRICE_SELECTORS: &[&str] = &[
    "#corePrice_feature_div .a-offscreen",
    ".a-price .a-offscreen",
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    ".a-price-whole",
    "#price_inside_buybox",
    "#newBuyBoxPrice",
    r#"span[data-a-color="price"] .a-offscreen"#,
];

const TITLE_SELECTOR: &str = "#productTitle";

/// Names shorter than this are treated as truncated.
const MIN_NAME_CHARS: usize = 5;

pub struct AmazonScraper;

impl AmazonScraper {
    fn price_from_selectors(ctx: &PageContext<'_>) -> Option<f64> {
        PRICE_SELECTORS.iter().find_map(|selector| {
            let element = ctx.first(selector)?;
            // Off-screen price spans often report no rendered text.
            let text = match element.text() {
                Ok(text) if !text.trim().is_empty() => text,
                _ => element.text_content().ok()?,
            };
            let price = extract_price_from_text(text.trim());
            is_plausible_price(price).then_some(price)
        })
    }
}

impl PlatformScraper for AmazonScraper {
    fn platform(&self) -> &'static str {
        "amazon"
    }

    fn check_page(&self, page: &dyn PageAccessor, profile: &StoreProfile) -> Result<()> {
        match page.page_source() {
            Ok(source) if source.to_lowercase().contains("captcha") => {
                tracing::warn!(url = %page.current_url(), "Challenge page detected");
                Err(AppError::ChallengeDetected {
                    store: profile.store.clone(),
                })
            }
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping challenge check");
                Ok(())
            }
        }
    }

    fn refine(&self, ctx: &PageContext<'_>, result: &mut ExtractionResult) {
        if !result.price.is_set() {
            if let Some(price) = Self::price_from_selectors(ctx) {
                result.offer_price(price);
            }
        }

        if result.name.get().chars().count() < MIN_NAME_CHARS {
            let title = ctx
                .first(TITLE_SELECTOR)
                .and_then(|element| element.text().ok())
                .map(|text| text.trim().to_string())
                .unwrap_or_default();

            if !title.is_empty() {
                result.name.overwrite(title);
            }
        }
    }
}
