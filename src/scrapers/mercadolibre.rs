use super::PlatformScraper;
use crate::extraction::{ExtractionResult, PageContext};
use crate::price::clean_price;

const FRACTION_SELECTOR: &str = ".andes-money-amount__fraction";

pub struct MercadoLibreScraper;

impl PlatformScraper for MercadoLibreScraper {
    fn platform(&self) -> &'static str {
        "mercadolibre"
    }

    fn refine(&self, ctx: &PageContext<'_>, result: &mut ExtractionResult) {
        if result.price.is_set() {
            return;
        }

        let Some(text) = ctx.first(FRACTION_SELECTOR).and_then(|element| element.text().ok())
        else {
            return;
        };

        if result.offer_price(clean_price(&text)) {
            tracing::debug!(price = *result.price.get(), "Price taken from andes fraction");
        }
    }
}
