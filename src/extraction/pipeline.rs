use std::thread;
use std::time::Duration;
use tracing::{debug, info};

use super::result::{ExtractionResult, Field, FillMode};
use super::selectors::{
    IMAGE_SELECTORS, JSON_LD_SELECTOR, NAME_SELECTORS, PRICE_SELECTORS, RAW_PRICE_PATTERNS,
};
use super::strategy::{
    ExtractionStrategy, ImageSelector, MetaTag, PageContext, PriceSelector, RawMarkupPattern,
    TextSelector,
};
use crate::platform::StoreProfile;
use crate::structured_data;

type Strategies = Vec<Box<dyn ExtractionStrategy>>;

/// Ordered fallback heuristics filling one [`ExtractionResult`]:
/// meta tags, JSON-LD, CSS conventions, then inline markup.
pub struct ExtractionPipeline {
    settle_delay: Duration,
    meta: Strategies,
    css: Strategies,
    raw: Strategies,
}

impl ExtractionPipeline {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            settle_delay,
            meta: meta_strategies(),
            css: css_strategies(),
            raw: raw_strategies(),
        }
    }

    /// Wait for the page to settle, then run every stage. Never fails; fields
    /// no strategy could fill stay unset.
    pub fn run(&self, ctx: &PageContext<'_>, profile: &StoreProfile) -> ExtractionResult {
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }
        self.extract(ctx, profile)
    }

    /// The stages of [`run`](Self::run) without the settle delay.
    pub fn extract(&self, ctx: &PageContext<'_>, profile: &StoreProfile) -> ExtractionResult {
        info!(url = %ctx.url(), "Extracting product data");
        let mut result = ExtractionResult::new(profile, ctx.url());

        // Meta prices replace each other: the last plausible one wins.
        apply_strategies(&self.meta, ctx, &mut result, FillMode::Overwrite);

        let blocks: Vec<String> = ctx
            .all(JSON_LD_SELECTOR)
            .iter()
            .filter_map(|script| script.inner_html().ok())
            .collect();
        structured_data::extract_blocks(blocks.iter().map(String::as_str), &mut result);

        apply_strategies(&self.css, ctx, &mut result, FillMode::FillOnce);

        if !result.price.is_set() {
            apply_strategies(&self.raw, ctx, &mut result, FillMode::FillOnce);
        }

        info!(
            name = %result.name.get(),
            price = *result.price.get(),
            has_image = result.image.is_set(),
            "Extraction finished"
        );
        result
    }
}

/// Evaluate strategies in order. Name and image candidates only fill empty
/// slots; price candidates follow `price_mode`.
pub fn apply_strategies(
    strategies: &[Box<dyn ExtractionStrategy>],
    ctx: &PageContext<'_>,
    result: &mut ExtractionResult,
    price_mode: FillMode,
) {
    for strategy in strategies {
        let field = strategy.field();
        let mode = match field {
            Field::Price => price_mode,
            Field::Name | Field::Image => FillMode::FillOnce,
        };

        if mode == FillMode::FillOnce && result.is_set(field) {
            continue;
        }

        if let Some(candidate) = strategy.attempt(ctx) {
            if result.apply(candidate, mode) {
                debug!(strategy = strategy.label(), ?field, "Strategy filled field");
            }
        }
    }
}

fn meta_strategies() -> Strategies {
    [
        (r#"meta[property="og:title"]"#, Field::Name),
        (r#"meta[property="og:image"]"#, Field::Image),
        (r#"meta[property="product:price:amount"]"#, Field::Price),
        (r#"meta[property="og:price:amount"]"#, Field::Price),
        (r#"meta[itemprop="price"]"#, Field::Price),
        (r#"meta[name="twitter:title"]"#, Field::Name),
        (r#"meta[name="twitter:image"]"#, Field::Image),
        (r#"meta[name="title"]"#, Field::Name),
    ]
    .into_iter()
    .map(|(selector, field)| Box::new(MetaTag::new(selector, field)) as Box<dyn ExtractionStrategy>)
    .collect()
}

fn css_strategies() -> Strategies {
    let names = NAME_SELECTORS
        .iter()
        .map(|&selector| Box::new(TextSelector { selector }) as Box<dyn ExtractionStrategy>);
    let prices = PRICE_SELECTORS
        .iter()
        .map(|&selector| Box::new(PriceSelector { selector }) as Box<dyn ExtractionStrategy>);
    let images = IMAGE_SELECTORS
        .iter()
        .map(|&selector| Box::new(ImageSelector { selector }) as Box<dyn ExtractionStrategy>);

    names.chain(prices).chain(images).collect()
}

fn raw_strategies() -> Strategies {
    RAW_PRICE_PATTERNS
        .iter()
        .filter_map(|pattern| RawMarkupPattern::new(pattern).ok())
        .map(|strategy| Box::new(strategy) as Box<dyn ExtractionStrategy>)
        .collect()
}
