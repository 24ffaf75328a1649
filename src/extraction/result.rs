use url::Url;

use crate::platform::StoreProfile;
use crate::price::is_plausible_price;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Price,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Only written while the slot is still unset.
    FillOnce,
    /// Replaces whatever an earlier strategy stored.
    Overwrite,
}

/// A value produced by one extraction strategy, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Name(String),
    Price(f64),
    Image(String),
}

impl Candidate {
    pub fn field(&self) -> Field {
        match self {
            Candidate::Name(_) => Field::Name,
            Candidate::Price(_) => Field::Price,
            Candidate::Image(_) => Field::Image,
        }
    }
}

/// A result field plus whether any strategy has filled it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slot<T> {
    value: T,
    set: bool,
}

impl<T> Slot<T> {
    pub fn is_set(&self) -> bool {
        self.set
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn overwrite(&mut self, value: T) {
        self.value = value;
        self.set = true;
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Per-request accumulator filled stage by stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub name: Slot<String>,
    pub price: Slot<f64>,
    pub image: Slot<String>,
    pub currency: String,
    pub store: String,
    page_url: String,
}

impl ExtractionResult {
    pub fn new(profile: &StoreProfile, page_url: impl Into<String>) -> Self {
        Self {
            name: Slot::default(),
            price: Slot::default(),
            image: Slot::default(),
            currency: profile.currency.clone(),
            store: profile.store.clone(),
            page_url: page_url.into(),
        }
    }

    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name.is_set(),
            Field::Price => self.price.is_set(),
            Field::Image => self.image.is_set(),
        }
    }

    /// Validate a candidate and store it according to `mode`.
    ///
    /// Names must be non-blank, prices must be plausible and images must
    /// resolve to an absolute http(s) URL; anything else is dropped.
    pub fn apply(&mut self, candidate: Candidate, mode: FillMode) -> bool {
        if mode == FillMode::FillOnce && self.is_set(candidate.field()) {
            return false;
        }

        match candidate {
            Candidate::Name(raw) => {
                let name = raw.trim();
                if name.is_empty() {
                    return false;
                }
                self.name.overwrite(name.to_string());
            }
            Candidate::Price(price) => {
                if !is_plausible_price(price) {
                    return false;
                }
                self.price.overwrite(price);
            }
            Candidate::Image(raw) => match absolute_http_url(&raw, &self.page_url) {
                Some(image) => self.image.overwrite(image),
                None => return false,
            },
        }
        true
    }

    pub fn offer_name(&mut self, name: &str) -> bool {
        self.apply(Candidate::Name(name.to_string()), FillMode::FillOnce)
    }

    pub fn offer_price(&mut self, price: f64) -> bool {
        self.apply(Candidate::Price(price), FillMode::FillOnce)
    }

    pub fn offer_image(&mut self, image: &str) -> bool {
        self.apply(Candidate::Image(image.to_string()), FillMode::FillOnce)
    }
}

/// Resolve `raw` against `base` and keep it only if it is an http(s) URL.
pub fn absolute_http_url(raw: &str, base: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let resolved = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base).ok()?.join(raw).ok()?,
        Err(_) => return None,
    };

    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_result() -> ExtractionResult {
        let profile = StoreProfile {
            currency: "MXN".to_string(),
            store: "Tienda".to_string(),
        };
        ExtractionResult::new(&profile, "https://tienda.mx/p/1")
    }

    #[test]
    fn test_fill_once_keeps_first_value() {
        let mut result = empty_result();
        assert!(result.offer_name("  Primera  "));
        assert!(!result.offer_name("Segunda"));
        assert_eq!(result.name.get(), "Primera");
    }

    #[test]
    fn test_overwrite_replaces_price() {
        let mut result = empty_result();
        assert!(result.offer_price(100.0));
        assert!(result.apply(Candidate::Price(90.0), FillMode::Overwrite));
        assert_eq!(*result.price.get(), 90.0);
    }

    #[test]
    fn test_implausible_price_leaves_slot_unset() {
        let mut result = empty_result();
        assert!(!result.offer_price(0.0));
        assert!(!result.offer_price(50_000_000.0));
        assert!(!result.price.is_set());
        assert_eq!(*result.price.get(), 0.0);
    }

    #[test]
    fn test_blank_name_is_not_a_value() {
        let mut result = empty_result();
        assert!(!result.offer_name("   "));
        assert!(!result.name.is_set());
    }

    #[test]
    fn test_image_must_be_http() {
        let mut result = empty_result();
        assert!(!result.offer_image("data:image/gif;base64,R0lGOD"));
        assert!(!result.offer_image("ftp://tienda.mx/a.png"));
        assert!(result.offer_image("/img/taza.jpg"));
        assert_eq!(result.image.get(), "https://tienda.mx/img/taza.jpg");
    }

    #[test]
    fn test_absolute_http_url() {
        let base = "https://tienda.mx/p/1";
        assert_eq!(
            absolute_http_url("//cdn.tienda.mx/a.png", base),
            Some("https://cdn.tienda.mx/a.png".to_string())
        );
        assert_eq!(
            absolute_http_url("http://cdn.tienda.mx/a.png", base),
            Some("http://cdn.tienda.mx/a.png".to_string())
        );
        assert_eq!(absolute_http_url("", base), None);
        assert_eq!(absolute_http_url("a.png", "not a url"), None);
    }
}
