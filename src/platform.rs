//! URL based storefront detection.
//!
//! The registry is scanned top to bottom and the first pattern contained in the
//! lower-cased URL wins, so entries with overlapping patterns must stay ordered.

use serde::{Deserialize, Serialize};
use url::Url;

pub const GENERIC_PLATFORM: &str = "generic";
pub const DEFAULT_CURRENCY: &str = "MXN";
pub const FALLBACK_STORE: &str = "Tienda Online";

#[derive(Debug)]
pub struct PlatformConfig {
    pub id: &'static str,
    pub patterns: &'static [&'static str],
    pub currency: &'static str,
    pub store: &'static str,
}

/// Currency and display name attached to every extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub currency: String,
    pub store: String,
}

impl From<&PlatformConfig> for StoreProfile {
    fn from(config: &PlatformConfig) -> Self {
        Self {
            currency: config.currency.to_string(),
            store: config.store.to_string(),
        }
    }
}

pub static PLATFORMS: &[PlatformConfig] = &[
    PlatformConfig {
        id: "mercadolibre",
        patterns: &["mercadolibre", "mercadolivre", "meli."],
        currency: "MXN",
        store: "MercadoLibre",
    },
    PlatformConfig {
        id: "amazon",
        patterns: &["amazon.com.mx", "amazon.com", "amzn.", "a.co/"],
        currency: "MXN",
        store: "Amazon",
    },
    PlatformConfig {
        id: "liverpool",
        patterns: &["liverpool.com.mx"],
        currency: "MXN",
        store: "Liverpool",
    },
    PlatformConfig {
        id: "walmart",
        patterns: &["walmart.com.mx"],
        currency: "MXN",
        store: "Walmart",
    },
    PlatformConfig {
        id: "coppel",
        patterns: &["coppel.com"],
        currency: "MXN",
        store: "Coppel",
    },
    PlatformConfig {
        id: "homedepot",
        patterns: &["homedepot.com.mx"],
        currency: "MXN",
        store: "Home Depot",
    },
    PlatformConfig {
        id: "elektra",
        patterns: &["elektra.com.mx"],
        currency: "MXN",
        store: "Elektra",
    },
    PlatformConfig {
        id: "costco",
        patterns: &["costco.com.mx"],
        currency: "MXN",
        store: "Costco",
    },
    PlatformConfig {
        id: "sams",
        patterns: &["sams.com.mx"],
        currency: "MXN",
        store: "Sam's Club",
    },
    PlatformConfig {
        id: "bestbuy",
        patterns: &["bestbuy.com.mx"],
        currency: "MXN",
        store: "Best Buy",
    },
    PlatformConfig {
        id: "officedepot",
        patterns: &["officedepot.com.mx"],
        currency: "MXN",
        store: "Office Depot",
    },
    PlatformConfig {
        id: "soriana",
        patterns: &["soriana.com"],
        currency: "MXN",
        store: "Soriana",
    },
    PlatformConfig {
        id: "sanborns",
        patterns: &["sanborns.com.mx"],
        currency: "MXN",
        store: "Sanborns",
    },
    PlatformConfig {
        id: "sears",
        patterns: &["sears.com.mx"],
        currency: "MXN",
        store: "Sears",
    },
    PlatformConfig {
        id: "palacio",
        patterns: &["elpalaciodehierro.com"],
        currency: "MXN",
        store: "El Palacio de Hierro",
    },
    PlatformConfig {
        id: "shein",
        patterns: &["shein.com.mx", "shein.com"],
        currency: "MXN",
        store: "Shein",
    },
    PlatformConfig {
        id: "aliexpress",
        patterns: &["aliexpress.com", "es.aliexpress"],
        currency: "USD",
        store: "AliExpress",
    },
    PlatformConfig {
        id: "ebay",
        patterns: &["ebay.com"],
        currency: "USD",
        store: "eBay",
    },
];

/// Map a URL to its platform id and store profile. Never fails.
pub fn detect(url: &str) -> (&'static str, StoreProfile) {
    let url_lower = url.to_lowercase();

    for platform in PLATFORMS {
        if platform.patterns.iter().any(|pattern| url_lower.contains(pattern)) {
            return (platform.id, StoreProfile::from(platform));
        }
    }

    (
        GENERIC_PLATFORM,
        StoreProfile {
            currency: DEFAULT_CURRENCY.to_string(),
            store: store_name_from_host(url).unwrap_or_else(|| FALLBACK_STORE.to_string()),
        },
    )
}

/// Display names of every registered storefront, in registry order.
pub fn supported_stores() -> Vec<&'static str> {
    PLATFORMS.iter().map(|platform| platform.store).collect()
}

fn store_name_from_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next().filter(|label| !label.is_empty())?;
    Some(capitalize(label))
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
