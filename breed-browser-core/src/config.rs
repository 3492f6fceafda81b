use crate::error::BrowserError;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const CONFIG_FILENAME: &str = "config.json";
pub const API_URL_ENV: &str = "BREED_BROWSER_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/dogs";
pub const DEFAULT_INPUT_ERROR_MILLIS: u64 = 2000;

/// Items per page on the backend. Only used for the "showing X-Y" range.
pub const PAGE_SIZE: u64 = 15;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BrowserConfig {
    pub api_base_url: String,
    /// How long the jump box stays flagged after a rejected entry.
    pub input_error_millis: u64,
    /// Unset means requests may hang forever.
    pub request_timeout_secs: Option<u64>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            input_error_millis: DEFAULT_INPUT_ERROR_MILLIS,
            request_timeout_secs: None,
        }
    }
}

impl BrowserConfig {
    /// Config file (if any) from the platform config directory, then env overrides.
    pub fn load() -> Result<Self, BrowserError> {
        let mut config = match Self::get_config_dir() {
            Some(dir) => Self::load_from_file(&dir.join(CONFIG_FILENAME))?,
            None => {
                debug!("No platform config directory, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, BrowserError> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: BrowserConfig =
            serde_json::from_str(&content).map_err(|source| BrowserError::InvalidConfig {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            debug!("API URL overridden from {}: {}", API_URL_ENV, url);
            self.api_base_url = url;
        }
    }

    fn get_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "breed-browser").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn input_error_duration(&self) -> Duration {
        Duration::from_millis(self.input_error_millis)
    }
}
