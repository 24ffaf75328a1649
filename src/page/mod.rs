//! Rendered-page access.
//!
//! The extraction core never talks to a browser directly; it only sees a
//! [`PageAccessor`]. Production wires in [`chrome::ChromePage`], tests and the
//! offline CLI use [`static_page::StaticPage`].

pub mod chrome;
pub mod static_page;

use std::time::Duration;

use crate::utils::error::{AppError, Result};

pub use chrome::{ChromeLauncher, ChromePage};
pub use static_page::StaticPage;

/// A single element handle returned by a page query.
pub trait PageElement {
    /// Visible text with runs of whitespace collapsed.
    fn text(&self) -> Result<String>;
    /// Raw DOM `textContent`, including text that is not rendered.
    fn text_content(&self) -> Result<String>;
    fn attribute(&self, name: &str) -> Result<Option<String>>;
    fn inner_html(&self) -> Result<String>;
}

pub type ElementHandle<'a> = Box<dyn PageElement + 'a>;

/// Query capability over one rendered page.
pub trait PageAccessor {
    fn navigate(&mut self, url: &str) -> Result<()>;
    fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<()>;
    fn find_element(&self, selector: &str) -> Result<Option<ElementHandle<'_>>>;
    fn find_elements(&self, selector: &str) -> Result<Vec<ElementHandle<'_>>>;
    fn page_source(&self) -> Result<String>;
    fn title(&self) -> Result<String>;
    fn current_url(&self) -> String;

    fn screenshot_png(&self) -> Result<Vec<u8>> {
        Err(AppError::Unsupported(
            "this page accessor cannot capture screenshots".to_string(),
        ))
    }
}

/// Opens a fresh page session. Each scrape request owns the page it gets.
pub trait SessionLauncher: Send + Sync {
    fn open(&self) -> Result<Box<dyn PageAccessor>>;
}
