use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::{ElementHandle, PageAccessor, PageElement, SessionLauncher};
use crate::config::ScraperConfig;
use crate::utils::error::{AppError, Result};

/// Launches one headless Chrome per session; the process exits when the
/// returned page is dropped.
#[derive(Clone)]
pub struct ChromeLauncher {
    config: ScraperConfig,
}

impl ChromeLauncher {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    fn launch_options(&self) -> Result<LaunchOptions<'static>> {
        let mut launch_options = LaunchOptions::default_builder()
            .headless(self.config.headless)
            .sandbox(false) // Often needed in containerized environments
            .window_size(Some((self.config.window_width, self.config.window_height)))
            .args(vec![
                OsStr::new("--no-sandbox"),
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-extensions"),
                OsStr::new("--disable-background-timer-throttling"),
                OsStr::new("--disable-backgrounding-occluded-windows"),
                OsStr::new("--disable-renderer-backgrounding"),
            ])
            .build()
            .map_err(|e| AppError::Browser(format!("Failed to create launch options: {}", e)))?;

        if let Some(chrome_path) = &self.config.chrome_path {
            launch_options.path = Some(PathBuf::from(chrome_path));
        }

        Ok(launch_options)
    }
}

impl SessionLauncher for ChromeLauncher {
    fn open(&self) -> Result<Box<dyn PageAccessor>> {
        let browser = Browser::new(self.launch_options()?)
            .map_err(|e| AppError::Browser(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| AppError::Browser(format!("Failed to create tab: {}", e)))?;

        tab.set_user_agent(
            &self.config.user_agent,
            Some(&self.config.accept_language),
            None,
        )
        .map_err(|e| AppError::Browser(format!("Failed to set user agent: {}", e)))?;

        tracing::debug!(headless = self.config.headless, "Browser session opened");

        Ok(Box::new(ChromePage {
            tab,
            _browser: browser,
        }))
    }
}

pub struct ChromePage {
    tab: Arc<Tab>,
    // Declared last so the tab is released before the browser process.
    _browser: Browser,
}

struct ChromeElement<'a> {
    element: Element<'a>,
}

impl ChromeElement<'_> {
    fn string_property(&self, function: &str) -> Result<String> {
        let remote = self
            .element
            .call_js_fn(function, vec![], false)
            .map_err(AppError::browser)?;

        Ok(remote
            .value
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default())
    }
}

impl PageElement for ChromeElement<'_> {
    fn text(&self) -> Result<String> {
        let text = self.element.get_inner_text().map_err(AppError::browser)?;
        Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.element
            .get_attribute_value(name)
            .map_err(AppError::browser)
    }

    fn text_content(&self) -> Result<String> {
        self.string_property("function() { return this.textContent; }")
    }

    fn inner_html(&self) -> Result<String> {
        self.string_property("function() { return this.innerHTML; }")
    }
}

impl PageAccessor for ChromePage {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.tab.navigate_to(url).map_err(|e| AppError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        self.tab.wait_until_navigated().map_err(|e| AppError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map(|_| ())
            .map_err(|_| AppError::PageTimeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
    }

    fn find_element(&self, selector: &str) -> Result<Option<ElementHandle<'_>>> {
        // headless_chrome reports "no match" as an error.
        Ok(self
            .tab
            .find_element(selector)
            .ok()
            .map(|element| Box::new(ChromeElement { element }) as ElementHandle<'_>))
    }

    fn find_elements(&self, selector: &str) -> Result<Vec<ElementHandle<'_>>> {
        Ok(self
            .tab
            .find_elements(selector)
            .unwrap_or_default()
            .into_iter()
            .map(|element| Box::new(ChromeElement { element }) as ElementHandle<'_>)
            .collect())
    }

    fn page_source(&self) -> Result<String> {
        self.tab
            .get_content()
            .map_err(|e| AppError::Browser(format!("Failed to get page content: {}", e)))
    }

    fn title(&self) -> Result<String> {
        self.tab.get_title().map_err(AppError::browser)
    }

    fn current_url(&self) -> String {
        self.tab.get_url()
    }

    fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(
                headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption::Png,
                None,
                None,
                true,
            )
            .map_err(|e| AppError::Browser(format!("Screenshot capture failed: {}", e)))
    }
}
