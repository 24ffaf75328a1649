//! Per-platform passes around the shared extraction pipeline.

pub mod amazon;
pub mod generic;
pub mod mercadolibre;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::ScraperConfig;
use crate::extraction::{ExtractionPipeline, ExtractionResult, PageContext};
use crate::page::PageAccessor;
use crate::platform::{self, StoreProfile};
use crate::sanitize::sanitize_name;
use crate::utils::error::Result;

pub use amazon::AmazonScraper;
pub use generic::GenericScraper;
pub use mercadolibre::MercadoLibreScraper;

/// Platform-specific behavior layered on top of [`ExtractionPipeline`].
pub trait PlatformScraper: Send + Sync {
    fn platform(&self) -> &'static str;

    /// Inspect the freshly loaded page before extraction. An error aborts the
    /// scrape.
    fn check_page(&self, _page: &dyn PageAccessor, _profile: &StoreProfile) -> Result<()> {
        Ok(())
    }

    /// Fill gaps the generic pipeline left.
    fn refine(&self, _ctx: &PageContext<'_>, _result: &mut ExtractionResult) {}
}

/// Final record returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedProduct {
    pub url: String,
    pub platform: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub currency: String,
    pub store: String,
    pub scraped_at: DateTime<Utc>,
}

pub struct ProductScraper {
    config: ScraperConfig,
    pipeline: ExtractionPipeline,
    scrapers: HashMap<&'static str, Box<dyn PlatformScraper>>,
    fallback: GenericScraper,
}

impl ProductScraper {
    pub fn new(config: ScraperConfig) -> Self {
        let mut scrapers: HashMap<&'static str, Box<dyn PlatformScraper>> = HashMap::new();
        for scraper in [
            Box::new(MercadoLibreScraper) as Box<dyn PlatformScraper>,
            Box::new(AmazonScraper),
        ] {
            scrapers.insert(scraper.platform(), scraper);
        }

        Self {
            pipeline: ExtractionPipeline::new(config.settle_delay()),
            config,
            scrapers,
            fallback: GenericScraper,
        }
    }

    pub fn scraper_for(&self, platform: &str) -> &dyn PlatformScraper {
        self.scrapers
            .get(platform)
            .map(|scraper| &**scraper)
            .unwrap_or(&self.fallback)
    }

    /// Load `url` into `page` and extract a product from it.
    ///
    /// Fails only when the page cannot be loaded, never becomes ready or is a
    /// challenge page; missing fields come back as `0` or empty.
    pub fn scrape(&self, page: &mut dyn PageAccessor, url: &str) -> Result<ScrapedProduct> {
        let (platform, profile) = platform::detect(url);
        info!(url, platform, store = %profile.store, "Scraping product");

        page.navigate(url)?;
        page.wait_for_element(&self.config.ready_selector, self.config.page_load_timeout())?;

        let page: &dyn PageAccessor = page;
        let scraper = self.scraper_for(platform);
        scraper.check_page(page, &profile)?;

        let ctx = PageContext::new(page);
        let mut result = self.pipeline.run(&ctx, &profile);
        scraper.refine(&ctx, &mut result);

        let title = page.title().unwrap_or_else(|e| {
            debug!(error = %e, "Page title unavailable");
            String::new()
        });
        let name = sanitize_name(result.name.get(), &title);

        let ExtractionResult {
            price,
            image,
            currency,
            store,
            ..
        } = result;

        Ok(ScrapedProduct {
            url: url.to_string(),
            platform: platform.to_string(),
            name,
            price: price.into_inner(),
            image: image.into_inner(),
            currency,
            store,
            scraped_at: Utc::now(),
        })
    }
}
