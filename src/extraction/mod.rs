pub mod pipeline;
pub mod result;
pub mod selectors;
pub mod strategy;

pub use pipeline::{apply_strategies, ExtractionPipeline};
pub use result::{absolute_http_url, Candidate, ExtractionResult, Field, FillMode, Slot};
pub use strategy::{
    ExtractionStrategy, ImageSelector, MetaTag, PageContext, PriceSelector, RawMarkupPattern,
    TextSelector,
};
