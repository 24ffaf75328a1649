//! Screenshot plus a few page details, for diagnosing why extraction missed.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use crate::page::PageAccessor;
use crate::utils::error::Result;

const META_PROPERTIES: &[&str] = &[
    "og:title",
    "og:image",
    "og:price:amount",
    "product:price:amount",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugSnapshot {
    /// `data:image/png;base64,...`
    pub screenshot: String,
    pub debug: DebugInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub title: String,
    pub url: String,
    pub h1: String,
    pub price_element: String,
    pub meta_tags: BTreeMap<String, String>,
}

pub fn capture_debug_snapshot(
    page: &mut dyn PageAccessor,
    url: &str,
    settle_delay: Duration,
) -> Result<DebugSnapshot> {
    tracing::info!(url, "Capturing debug snapshot");

    page.navigate(url)?;
    if !settle_delay.is_zero() {
        thread::sleep(settle_delay);
    }

    let png = page.screenshot_png()?;
    let page: &dyn PageAccessor = page;

    let debug = DebugInfo {
        title: page.title().unwrap_or_default(),
        url: page.current_url(),
        h1: element_text(page, "h1", 100, "No h1 text", "No h1 found"),
        price_element: element_text(
            page,
            r#"[class*="price"]"#,
            50,
            "No price text",
            "No price found",
        ),
        meta_tags: meta_tags(page),
    };

    Ok(DebugSnapshot {
        screenshot: format!("data:image/png;base64,{}", STANDARD.encode(png)),
        debug,
    })
}

fn element_text(
    page: &dyn PageAccessor,
    selector: &str,
    max_chars: usize,
    when_empty: &str,
    when_missing: &str,
) -> String {
    match page.find_element(selector) {
        Ok(Some(element)) => {
            let text = element.text().unwrap_or_default();
            if text.is_empty() {
                when_empty.to_string()
            } else {
                text.chars().take(max_chars).collect()
            }
        }
        _ => when_missing.to_string(),
    }
}

fn meta_tags(page: &dyn PageAccessor) -> BTreeMap<String, String> {
    META_PROPERTIES
        .iter()
        .filter_map(|property| {
            let selector = format!(r#"meta[property="{}"]"#, property);
            let element = page.find_element(&selector).ok().flatten()?;
            let content = element.attribute("content").ok().flatten()?;
            Some((property.to_string(), content))
        })
        .collect()
}
