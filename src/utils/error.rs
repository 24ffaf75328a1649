use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Timed out after {timeout_ms}ms waiting for '{selector}'")]
    PageTimeout { selector: String, timeout_ms: u64 },

    #[error("{store} requiere verificación CAPTCHA")]
    ChallengeDetected { store: String },

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wire code reported in `{success: false, error: <code>}` bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ChallengeDetected { .. } => "CAPTCHA_DETECTADO",
            _ => "ERROR_SCRAPING",
        }
    }

    pub fn browser(err: impl std::fmt::Display) -> Self {
        AppError::Browser(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
