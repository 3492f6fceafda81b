use crate::config::BrowserConfig;
use crate::error::BrowserError;
use crate::models::{DogPageResponse, GENERIC_FETCH_ERROR, PageFetchResult};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::time::Duration;

const USER_AGENT: &str = "breed-browser-core/0.1";
const ACCEPT: &str = "application/json";

/// Where pages come from. Implementations fold every failure into
/// `PageFetchResult::Failure`; nothing here retries.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> PageFetchResult;
}

#[derive(Debug, Clone)]
pub struct DogApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl DogApiClient {
    pub fn new(config: &BrowserConfig) -> Result<Self, BrowserError> {
        validate_api_url(&config.api_base_url)?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(ACCEPT),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(DogApiClient {
            client: builder.build()?,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call(&self, page: u32) -> Result<DogPageResponse, BrowserError> {
        debug!("calling dog API: {}?page={}", self.base_url, page);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page)])
            .send()
            .await?;

        // Domain failures arrive in the body, sometimes with a non-2xx status.
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!("dog API answered page {} with status {}", page, status);

        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn validate_api_url(raw: &str) -> Result<(), BrowserError> {
    let invalid = |reason: String| BrowserError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };
    let url = reqwest::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

#[async_trait]
impl PageSource for DogApiClient {
    async fn fetch_page(&self, page: u32) -> PageFetchResult {
        match self.call(page).await {
            Ok(body) => {
                let result = PageFetchResult::from(body);
                match &result {
                    PageFetchResult::Success {
                        items,
                        total_pages,
                        total_items,
                    } => info!(
                        "Fetched page {} with {} items ({} pages, {} items total)",
                        page,
                        items.len(),
                        total_pages,
                        total_items
                    ),
                    PageFetchResult::Failure { message } => {
                        warn!("Dog API rejected page {}: {}", page, message)
                    }
                }
                result
            }
            Err(e) => {
                error!("Fetching page {} failed: {}", page, e);
                PageFetchResult::failure(GENERIC_FETCH_ERROR)
            }
        }
    }
}
