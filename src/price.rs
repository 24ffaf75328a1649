//! Price text normalization.
//!
//! Everything here returns `0.0` for "no price" instead of an error; callers
//! decide whether a candidate is usable through [`is_plausible_price`].

use regex::Regex;
use std::sync::LazyLock;

/// Candidates at or above this value are treated as parsing noise.
pub const PRICE_CEILING: f64 = 10_000_000.0;

static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // $1,299.00
        r"(?i)\$\s*([\d,]+\.?\d*)",
        // 1,299.00 MXN
        r"(?i)([\d,]+\.?\d*)\s*(?:MXN|USD|EUR)",
        // Precio: 1,299.00
        r"(?i)(?:precio|price)[:\s]*([\d,]+\.?\d*)",
        r"(?i)(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Convert raw price text into a number.
///
/// Only digits, `,` and `.` survive. When both separators appear the rightmost
/// one is the decimal point. A lone comma is decimal only when exactly two
/// digits follow it (`12,99`), otherwise it is thousands grouping (`12,990`,
/// `12,5`).
///
/// A lone dot is always decimal, so `12.990` reads as `12.99`; there is no way
/// to tell dotted thousands grouping apart without locale context.
pub fn clean_price(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => {
            let parts: Vec<&str> = cleaned.split(',').collect();
            if parts.len() == 2 && parts[1].len() == 2 {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        (None, _) => cleaned,
    };

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Pull the most price-looking number out of free text and normalize it.
pub fn extract_price_from_text(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    for pattern in PRICE_PATTERNS.iter() {
        if let Some(amount) = pattern.captures(text).and_then(|captures| captures.get(1)) {
            return clean_price(amount.as_str());
        }
    }

    clean_price(text)
}

pub fn is_plausible_price(price: f64) -> bool {
    price > 0.0 && price < PRICE_CEILING
}
