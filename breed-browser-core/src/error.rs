use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum BrowserError {
    Network(reqwest::Error),
    Json(serde_json::Error),
    /// The config file exists but doesn't decode as a `BrowserConfig`.
    InvalidConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The listing endpoint is not an absolute http(s) URL.
    InvalidApiUrl { url: String, reason: String },
    Io(std::io::Error),
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::Network(e) => write!(f, "Network error: {}", e),
            BrowserError::Json(e) => write!(f, "JSON parsing error: {}", e),
            BrowserError::InvalidConfig { path, source } => {
                write!(f, "Invalid config file {}: {}", path.display(), source)
            }
            BrowserError::InvalidApiUrl { url, reason } => {
                write!(f, "Invalid breed listing URL '{}': {}", url, reason)
            }
            BrowserError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowserError::Network(e) => Some(e),
            BrowserError::Json(e) | BrowserError::InvalidConfig { source: e, .. } => Some(e),
            BrowserError::Io(e) => Some(e),
            BrowserError::InvalidApiUrl { .. } => None,
        }
    }
}

impl From<reqwest::Error> for BrowserError {
    fn from(err: reqwest::Error) -> Self {
        BrowserError::Network(err)
    }
}

impl From<serde_json::Error> for BrowserError {
    fn from(err: serde_json::Error) -> Self {
        BrowserError::Json(err)
    }
}

impl From<std::io::Error> for BrowserError {
    fn from(err: std::io::Error) -> Self {
        BrowserError::Io(err)
    }
}

/// Rejected navigation: bad jump input or a page outside `[1, total_pages]`.
///
/// Never stored in page state; the view only shows it as transient feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageInputError {
    NotANumber(String),
    OutOfRange { page: i64, total_pages: u32 },
}

impl fmt::Display for PageInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageInputError::NotANumber(raw) => write!(f, "'{}' is not a page number", raw),
            PageInputError::OutOfRange { page, total_pages } => {
                write!(f, "Page {} is outside 1..={}", page, total_pages)
            }
        }
    }
}

impl std::error::Error for PageInputError {}
