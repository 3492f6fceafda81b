use serde::Deserialize;

/// Shown for transport failures and bodies that don't decode.
pub const GENERIC_FETCH_ERROR: &str =
    "Failed to fetch dogs. Please make sure the backend server is running.";

/// One breed card. The controller passes these through untouched.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Record {
    #[serde(rename = "breed")]
    pub label: String,
    #[serde(rename = "image", default)]
    pub image_url: Option<String>,
}

/// Body of `GET /api/dogs?page=N`.
///
/// Successful pages carry `items`/`total_pages`/`total_items`; domain
/// failures carry `error` and whatever subset of the other fields the
/// backend felt like sending.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct DogPageResponse {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub items: Vec<Record>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub items_per_page: Option<u32>,
    #[serde(default)]
    pub loading_complete: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageFetchResult {
    Success {
        items: Vec<Record>,
        total_pages: u32,
        total_items: u64,
    },
    Failure {
        message: String,
    },
}

impl PageFetchResult {
    pub fn failure(message: impl Into<String>) -> Self {
        PageFetchResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PageFetchResult::Success { .. })
    }
}

impl From<DogPageResponse> for PageFetchResult {
    fn from(response: DogPageResponse) -> Self {
        if let Some(error) = response.error {
            return PageFetchResult::Failure { message: error };
        }

        match response.total_pages {
            Some(total_pages) => PageFetchResult::Success {
                items: response.items,
                total_pages: total_pages.max(1),
                total_items: response.total_items.unwrap_or(0),
            },
            None => PageFetchResult::failure(GENERIC_FETCH_ERROR),
        }
    }
}
