use regex::Regex;
use std::cell::OnceCell;

use super::result::{absolute_http_url, Candidate, Field};
use crate::page::{ElementHandle, PageAccessor};
use crate::price::{clean_price, extract_price_from_text, is_plausible_price};

/// Shared view of the page for one pipeline run. The page source is fetched
/// at most once.
pub struct PageContext<'a> {
    page: &'a dyn PageAccessor,
    url: String,
    source: OnceCell<Option<String>>,
}

impl<'a> PageContext<'a> {
    pub fn new(page: &'a dyn PageAccessor) -> Self {
        Self {
            url: page.current_url(),
            page,
            source: OnceCell::new(),
        }
    }

    pub fn page(&self) -> &'a dyn PageAccessor {
        self.page
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn page_source(&self) -> Option<&str> {
        self.source
            .get_or_init(|| match self.page.page_source() {
                Ok(source) => Some(source),
                Err(e) => {
                    tracing::debug!(error = %e, "Page source unavailable");
                    None
                }
            })
            .as_deref()
    }

    /// First match for `selector`; lookup faults count as "absent".
    pub fn first(&self, selector: &str) -> Option<ElementHandle<'a>> {
        match self.page.find_element(selector) {
            Ok(element) => element,
            Err(e) => {
                tracing::debug!(selector, error = %e, "Element lookup failed");
                None
            }
        }
    }

    pub fn all(&self, selector: &str) -> Vec<ElementHandle<'a>> {
        self.page.find_elements(selector).unwrap_or_else(|e| {
            tracing::debug!(selector, error = %e, "Element lookup failed");
            Vec::new()
        })
    }
}

/// One heuristic producing a candidate for a single result field.
pub trait ExtractionStrategy: Send + Sync {
    fn field(&self) -> Field;
    fn label(&self) -> &str;
    fn attempt(&self, ctx: &PageContext<'_>) -> Option<Candidate>;
}

/// Reads an attribute from the first element matching a `<meta>` selector.
pub struct MetaTag {
    pub selector: &'static str,
    pub attribute: &'static str,
    pub field: Field,
}

impl MetaTag {
    pub const fn new(selector: &'static str, field: Field) -> Self {
        Self {
            selector,
            attribute: "content",
            field,
        }
    }
}

impl ExtractionStrategy for MetaTag {
    fn field(&self) -> Field {
        self.field
    }

    fn label(&self) -> &str {
        self.selector
    }

    fn attempt(&self, ctx: &PageContext<'_>) -> Option<Candidate> {
        let element = ctx.first(self.selector)?;
        let value = element.attribute(self.attribute).ok().flatten()?;
        if value.is_empty() {
            return None;
        }

        match self.field {
            Field::Name => Some(Candidate::Name(value.trim().to_string())),
            Field::Image => Some(Candidate::Image(value)),
            Field::Price => {
                let price = clean_price(&value);
                is_plausible_price(price).then_some(Candidate::Price(price))
            }
        }
    }
}

/// Takes the trimmed text of the first matching element.
pub struct TextSelector {
    pub selector: &'static str,
}

impl ExtractionStrategy for TextSelector {
    fn field(&self) -> Field {
        Field::Name
    }

    fn label(&self) -> &str {
        self.selector
    }

    fn attempt(&self, ctx: &PageContext<'_>) -> Option<Candidate> {
        let text = ctx.first(self.selector)?.text().ok()?;
        let text = text.trim();
        (!text.is_empty()).then(|| Candidate::Name(text.to_string()))
    }
}

const IMAGE_ATTRIBUTES: &[&str] = &["src", "data-src", "data-zoom"];

/// Takes the first image-bearing attribute of the first matching element
/// that resolves to an absolute http(s) URL.
pub struct ImageSelector {
    pub selector: &'static str,
}

impl ExtractionStrategy for ImageSelector {
    fn field(&self) -> Field {
        Field::Image
    }

    fn label(&self) -> &str {
        self.selector
    }

    fn attempt(&self, ctx: &PageContext<'_>) -> Option<Candidate> {
        let element = ctx.first(self.selector)?;
        IMAGE_ATTRIBUTES
            .iter()
            .filter_map(|attribute| element.attribute(attribute).ok().flatten())
            .find_map(|raw| absolute_http_url(&raw, ctx.url()))
            .map(Candidate::Image)
    }
}

const PRICE_ATTRIBUTES: &[&str] = &["content", "data-price"];

/// Scans every match of a selector for the first plausible price, reading
/// the element text, then `content`, then `data-price`.
pub struct PriceSelector {
    pub selector: &'static str,
}

impl ExtractionStrategy for PriceSelector {
    fn field(&self) -> Field {
        Field::Price
    }

    fn label(&self) -> &str {
        self.selector
    }

    fn attempt(&self, ctx: &PageContext<'_>) -> Option<Candidate> {
        ctx.all(self.selector).iter().find_map(|element| {
            let text = element.text().ok().map(|text| text.trim().to_string());
            let attributes = PRICE_ATTRIBUTES
                .iter()
                .map(|attribute| element.attribute(attribute).ok().flatten());

            std::iter::once(text)
                .chain(attributes)
                .flatten()
                .filter(|raw| !raw.is_empty())
                .map(|raw| extract_price_from_text(&raw))
                .find(|price| is_plausible_price(*price))
                .map(Candidate::Price)
        })
    }
}

/// Searches the raw page source for an inline price value.
pub struct RawMarkupPattern {
    label: String,
    pattern: Regex,
}

impl RawMarkupPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            label: pattern.to_string(),
            pattern: Regex::new(pattern)?,
        })
    }
}

impl ExtractionStrategy for RawMarkupPattern {
    fn field(&self) -> Field {
        Field::Price
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn attempt(&self, ctx: &PageContext<'_>) -> Option<Candidate> {
        let source = ctx.page_source()?;
        let raw = self.pattern.captures(source)?.get(1)?.as_str();
        let price = clean_price(raw);

        if !is_plausible_price(price) {
            tracing::debug!(pattern = %self.label, price, "Discarding implausible inline price");
            return None;
        }
        Some(Candidate::Price(price))
    }
}
