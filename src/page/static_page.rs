use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use super::{ElementHandle, PageAccessor, PageElement};
use crate::utils::error::{AppError, Result};

/// A page backed by an already-rendered HTML string.
///
/// `navigate` only records the URL; the markup never changes.
pub struct StaticPage {
    url: String,
    source: String,
    document: Html,
}

impl StaticPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        let source = html.into();
        let document = Html::parse_document(&source);
        Self {
            url: url.into(),
            source,
            document,
        }
    }

    fn select(&self, selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| AppError::InvalidSelector {
            selector: selector.to_string(),
            message: format!("{:?}", e),
        })
    }
}

struct StaticElement<'a> {
    element: ElementRef<'a>,
}

impl PageElement for StaticElement<'_> {
    fn text(&self) -> Result<String> {
        Ok(collapse_whitespace(self.element.text()))
    }

    fn text_content(&self) -> Result<String> {
        Ok(self.element.text().collect())
    }

    fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.element.value().attr(name).map(str::to_string))
    }

    fn inner_html(&self) -> Result<String> {
        Ok(self.element.inner_html())
    }
}

impl PageAccessor for StaticPage {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.url = url.to_string();
        Ok(())
    }

    fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<()> {
        let css_selector = self.select(selector)?;
        if self.document.select(&css_selector).next().is_some() {
            Ok(())
        } else {
            Err(AppError::PageTimeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }

    fn find_element(&self, selector: &str) -> Result<Option<ElementHandle<'_>>> {
        let css_selector = self.select(selector)?;
        Ok(self
            .document
            .select(&css_selector)
            .next()
            .map(|element| Box::new(StaticElement { element }) as ElementHandle<'_>))
    }

    fn find_elements(&self, selector: &str) -> Result<Vec<ElementHandle<'_>>> {
        let css_selector = self.select(selector)?;
        Ok(self
            .document
            .select(&css_selector)
            .map(|element| Box::new(StaticElement { element }) as ElementHandle<'_>)
            .collect())
    }

    fn page_source(&self) -> Result<String> {
        Ok(self.source.clone())
    }

    fn title(&self) -> Result<String> {
        let css_selector = self.select("title")?;
        Ok(self
            .document
            .select(&css_selector)
            .next()
            .map(|element| collapse_whitespace(element.text()))
            .unwrap_or_default())
    }

    fn current_url(&self) -> String {
        self.url.clone()
    }
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
