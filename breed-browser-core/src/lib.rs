pub mod api;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod page_input;
pub mod pager;

pub use api::{DogApiClient, PageSource};
pub use config::{BrowserConfig, PAGE_SIZE};
pub use controller::{ErrorKind, FetchStatus, PageController, PageState, SettleOutcome};
pub use dispatch::{ChannelDispatcher, FetchDispatcher, PendingFetches, SettledFetch};
pub use error::{BrowserError, PageInputError};
pub use models::{DogPageResponse, GENERIC_FETCH_ERROR, PageFetchResult, Record};
pub use page_input::{FlashToken, JumpField, parse_page_input};
pub use pager::{MAX_VISIBLE_PAGES, PageMarker, page_markers, render_markers};
