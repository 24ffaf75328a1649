pub mod config;
pub mod debug;
pub mod extraction;
pub mod page;
pub mod platform;
pub mod price;
pub mod sanitize;
pub mod scrapers;
pub mod structured_data;
pub mod utils;
pub mod web;

// Re-export commonly used types
pub use config::{AppConfig, ScraperConfig, ServerConfig};
pub use extraction::{ExtractionPipeline, ExtractionResult};
pub use page::{ChromeLauncher, PageAccessor, SessionLauncher, StaticPage};
pub use platform::{detect, StoreProfile};
pub use price::{clean_price, extract_price_from_text};
pub use scrapers::{ProductScraper, ScrapedProduct};
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
