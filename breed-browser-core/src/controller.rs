use crate::config::PAGE_SIZE;
use crate::dispatch::FetchDispatcher;
use crate::error::PageInputError;
use crate::models::{PageFetchResult, Record};
use crate::page_input::parse_page_input;
use crate::pager::{PageMarker, page_markers};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Everything the view is allowed to look at.
#[derive(Debug, Clone)]
pub struct PageState {
    pub current_page: u32,
    /// `None` until the first successful fetch reports it.
    pub total_pages: Option<u32>,
    pub total_items: u64,
    /// Only meaningful while `status` is `Loaded`.
    pub items: Vec<Record>,
    pub status: FetchStatus,
    pub error_message: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: None,
            total_items: 0,
            items: Vec::new(),
            status: FetchStatus::Idle,
            error_message: None,
        }
    }
}

impl PageState {
    /// Page count for display; 1 until the backend has told us otherwise.
    pub fn total_pages(&self) -> u32 {
        self.total_pages.unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Applied,
    /// The result was for a page we've since navigated away from.
    Stale,
}

/// How the error panel frames a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PageNotFound,
    LoadFailed,
}

impl ErrorKind {
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::PageNotFound => "Oops! Page Not Found",
            ErrorKind::LoadFailed => "Error Loading Breeds",
        }
    }
}

/// Owns the paging state for one browsing screen and decides when to fetch.
///
/// Every accepted navigation sets `Loading` and dispatches exactly one fetch.
/// Results are applied only if they are for the page currently shown, so the
/// last navigation wins no matter what order responses arrive in.
#[derive(Debug)]
pub struct PageController<D: FetchDispatcher> {
    state: PageState,
    dispatcher: D,
}

impl<D: FetchDispatcher> PageController<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            state: PageState::default(),
            dispatcher,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    /// Initial fetch when the screen appears.
    pub fn mount(&mut self) {
        debug!("Mounting page controller");
        self.load(1);
    }

    pub fn request_page(&mut self, target: i64) -> Result<u32, PageInputError> {
        let upper = self.state.total_pages.map(i64::from).unwrap_or(i64::from(u32::MAX));
        if target < 1 || target > upper {
            debug!(
                "Rejected navigation to page {} (total pages: {:?})",
                target, self.state.total_pages
            );
            return Err(PageInputError::OutOfRange {
                page: target,
                total_pages: self.state.total_pages(),
            });
        }

        // Bounded by `upper` above
        let page = target as u32;
        self.load(page);
        Ok(page)
    }

    fn load(&mut self, page: u32) {
        self.state.status = FetchStatus::Loading;
        self.state.error_message = None;
        self.state.current_page = page;
        self.dispatcher.dispatch(page);
    }

    pub fn on_fetch_settled(&mut self, page: u32, result: PageFetchResult) -> SettleOutcome {
        if page != self.state.current_page {
            debug!(
                "Discarding stale result for page {} (now on page {})",
                page, self.state.current_page
            );
            return SettleOutcome::Stale;
        }

        match result {
            PageFetchResult::Success {
                items,
                total_pages,
                total_items,
            } => {
                self.state.items = items;
                self.state.total_pages = Some(total_pages);
                self.state.total_items = total_items;
                self.state.status = FetchStatus::Loaded;
            }
            PageFetchResult::Failure { message } => {
                self.state.items.clear();
                self.state.error_message = Some(message);
                self.state.status = FetchStatus::Error;
            }
        }
        SettleOutcome::Applied
    }

    /// Validate jump-box text and navigate. The caller owns the input field
    /// and its error flash; page state is untouched on rejection.
    pub fn jump_to_page(&mut self, raw_input: &str) -> Result<u32, PageInputError> {
        let page = parse_page_input(raw_input, self.state.total_pages())?;
        self.request_page(i64::from(page))
    }

    pub fn next_page(&mut self) -> Result<u32, PageInputError> {
        self.request_page(i64::from(self.state.current_page) + 1)
    }

    pub fn prev_page(&mut self) -> Result<u32, PageInputError> {
        self.request_page(i64::from(self.state.current_page) - 1)
    }

    pub fn first_page(&mut self) -> Result<u32, PageInputError> {
        self.request_page(1)
    }

    /// Fetch the current page again.
    pub fn retry(&mut self) -> Result<u32, PageInputError> {
        self.request_page(i64::from(self.state.current_page))
    }

    pub fn markers(&self) -> Vec<PageMarker> {
        page_markers(self.state.current_page, self.state.total_pages())
    }

    pub fn can_go_prev(&self) -> bool {
        self.state.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.state.current_page < self.state.total_pages()
    }

    /// 1-based inclusive item range shown on the current page.
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        let total = self.state.total_items;
        if total == 0 {
            return None;
        }
        let page = u64::from(self.state.current_page);
        let start = (page - 1) * PAGE_SIZE + 1;
        let end = (page * PAGE_SIZE).min(total);
        (start <= end).then_some((start, end))
    }

    /// Framed against the displayed page count, so a failed fetch past it
    /// (including any page past 1 before totals are known) is "not found".
    pub fn error_kind(&self) -> Option<ErrorKind> {
        if self.state.status != FetchStatus::Error {
            return None;
        }
        if self.state.current_page > self.state.total_pages() {
            Some(ErrorKind::PageNotFound)
        } else {
            Some(ErrorKind::LoadFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::PendingFetches;
    use crate::models::GENERIC_FETCH_ERROR;
    use crate::pager::PageMarker::{Ellipsis, Page};

    fn breeds(names: &[&str]) -> Vec<Record> {
        names
            .iter()
            .map(|name| Record {
                label: name.to_string(),
                image_url: Some(format!("https://images.example/{}.jpg", name)),
            })
            .collect()
    }

    fn success(total_pages: u32, total_items: u64) -> PageFetchResult {
        PageFetchResult::Success {
            items: breeds(&["Beagle", "Boxer"]),
            total_pages,
            total_items,
        }
    }

    /// Mounted controller with page 1 loaded and `total_pages` known.
    fn loaded_controller(total_pages: u32) -> PageController<PendingFetches> {
        let mut controller = PageController::new(PendingFetches::new());
        controller.mount();
        assert_eq!(controller.dispatcher_mut().drain(), vec![1]);
        let outcome =
            controller.on_fetch_settled(1, success(total_pages, u64::from(total_pages) * 15));
        assert_eq!(outcome, SettleOutcome::Applied);
        controller
    }

    #[test]
    fn test_new_controller_is_idle_on_page_one() {
        let controller = PageController::new(PendingFetches::new());
        let state = controller.state();
        assert_eq!(state.status, FetchStatus::Idle);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_pages, None);
        assert!(controller.dispatcher().pending().is_empty());
    }

    #[test]
    fn test_mount_starts_loading_page_one() {
        let mut controller = PageController::new(PendingFetches::new());
        controller.mount();
        assert_eq!(controller.state().status, FetchStatus::Loading);
        assert_eq!(controller.dispatcher().pending(), &[1]);
    }

    #[test]
    fn test_success_applies_items_and_totals() {
        let controller = loaded_controller(12);
        let state = controller.state();
        assert_eq!(state.status, FetchStatus::Loaded);
        assert_eq!(state.total_pages, Some(12));
        assert_eq!(state.total_items, 180);
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn test_accepted_request_issues_one_fetch_and_loads_synchronously() {
        let mut controller = loaded_controller(10);
        for page in 1..=10 {
            assert_eq!(controller.request_page(i64::from(page)), Ok(page));
            assert_eq!(controller.state().status, FetchStatus::Loading);
            assert_eq!(controller.state().current_page, page);
            assert_eq!(controller.dispatcher_mut().drain(), vec![page]);
        }
    }

    #[test]
    fn test_out_of_range_request_changes_nothing() {
        let mut controller = loaded_controller(10);
        for target in [0, -1, 11, i64::MAX, i64::MIN] {
            assert_eq!(
                controller.request_page(target),
                Err(PageInputError::OutOfRange {
                    page: target,
                    total_pages: 10
                })
            );
            assert_eq!(controller.state().current_page, 1);
            assert_eq!(controller.state().status, FetchStatus::Loaded);
            assert!(controller.dispatcher().pending().is_empty());
        }
    }

    #[test]
    fn test_before_totals_known_only_lower_bound_applies() {
        let mut controller = PageController::new(PendingFetches::new());
        assert!(controller.request_page(0).is_err());
        assert_eq!(controller.request_page(40), Ok(40));
        assert_eq!(controller.dispatcher().pending(), &[40]);
    }

    #[test]
    fn test_requesting_current_page_refetches_without_moving() {
        let mut controller = loaded_controller(10);
        controller.request_page(4).unwrap();
        controller.on_fetch_settled(4, success(10, 150));
        controller.dispatcher_mut().drain();

        assert_eq!(controller.request_page(4), Ok(4));
        assert_eq!(controller.state().current_page, 4);
        assert_eq!(controller.state().status, FetchStatus::Loading);
        assert_eq!(controller.dispatcher_mut().drain(), vec![4]);

        assert_eq!(controller.retry(), Ok(4));
        assert_eq!(controller.dispatcher_mut().drain(), vec![4]);
    }

    #[test]
    fn test_stale_success_is_discarded() {
        let mut controller = loaded_controller(10);
        controller.request_page(3).unwrap();
        controller.request_page(4).unwrap();
        assert_eq!(controller.dispatcher_mut().drain(), vec![3, 4]);

        let outcome = controller.on_fetch_settled(3, success(10, 150));
        assert_eq!(outcome, SettleOutcome::Stale);
        assert_eq!(controller.state().current_page, 4);
        assert_eq!(controller.state().status, FetchStatus::Loading);

        let fresh = PageFetchResult::Success {
            items: breeds(&["Pug"]),
            total_pages: 10,
            total_items: 150,
        };
        assert_eq!(controller.on_fetch_settled(4, fresh), SettleOutcome::Applied);
        assert_eq!(controller.state().status, FetchStatus::Loaded);
        assert_eq!(controller.state().items, breeds(&["Pug"]));
    }

    #[test]
    fn test_stale_result_after_load_does_not_overwrite() {
        let mut controller = loaded_controller(10);
        controller.request_page(3).unwrap();
        controller.request_page(4).unwrap();
        controller.on_fetch_settled(4, success(10, 150));

        let late = PageFetchResult::failure("Page out of range");
        assert_eq!(controller.on_fetch_settled(3, late), SettleOutcome::Stale);
        assert_eq!(controller.state().status, FetchStatus::Loaded);
        assert_eq!(controller.state().error_message, None);
    }

    #[test]
    fn test_failure_sets_error_and_clears_items() {
        let mut controller = loaded_controller(10);
        controller.request_page(2).unwrap();
        let outcome = controller.on_fetch_settled(2, PageFetchResult::failure(GENERIC_FETCH_ERROR));

        assert_eq!(outcome, SettleOutcome::Applied);
        let state = controller.state();
        assert_eq!(state.status, FetchStatus::Error);
        assert_eq!(state.error_message.as_deref(), Some(GENERIC_FETCH_ERROR));
        assert!(state.items.is_empty());
        assert_eq!(state.total_pages, Some(10));
        assert_eq!(controller.error_kind(), Some(ErrorKind::LoadFailed));
    }

    #[test]
    fn test_new_request_after_error_clears_message() {
        let mut controller = loaded_controller(10);
        controller.request_page(2).unwrap();
        controller.on_fetch_settled(2, PageFetchResult::failure("boom"));

        assert_eq!(controller.first_page(), Ok(1));
        assert_eq!(controller.state().status, FetchStatus::Loading);
        assert_eq!(controller.state().error_message, None);
        assert_eq!(controller.error_kind(), None);
    }

    #[test]
    fn test_failure_past_unknown_totals_is_page_not_found() {
        let mut controller = PageController::new(PendingFetches::new());
        assert_eq!(controller.request_page(40), Ok(40));
        controller.on_fetch_settled(40, PageFetchResult::failure("Page out of range"));

        assert_eq!(controller.error_kind(), Some(ErrorKind::PageNotFound));
        assert_eq!(controller.error_kind().map(|kind| kind.title()), Some("Oops! Page Not Found"));
        assert_eq!(controller.state().error_message.as_deref(), Some("Page out of range"));
    }

    #[test]
    fn test_failure_within_known_totals_is_load_failure() {
        let mut controller = PageController::new(PendingFetches::new());
        controller.mount();
        controller.on_fetch_settled(1, PageFetchResult::failure(GENERIC_FETCH_ERROR));
        assert_eq!(controller.error_kind(), Some(ErrorKind::LoadFailed));

        let mut controller = loaded_controller(12);
        controller.request_page(12).unwrap();
        controller.on_fetch_settled(12, PageFetchResult::failure("boom"));
        assert_eq!(controller.error_kind(), Some(ErrorKind::LoadFailed));
        assert_eq!(ErrorKind::LoadFailed.title(), "Error Loading Breeds");
    }

    #[test]
    fn test_rejected_jumps_leave_state_alone() {
        let mut controller = loaded_controller(5);
        for raw in ["abc", "0", "-2", "6", "", "9.5"] {
            assert!(controller.jump_to_page(raw).is_err(), "{raw}");
            assert_eq!(controller.state().current_page, 1);
            assert_eq!(controller.state().total_pages, Some(5));
            assert!(controller.dispatcher().pending().is_empty());
        }
    }

    #[test]
    fn test_accepted_jump_requests_page() {
        let mut controller = loaded_controller(5);
        assert_eq!(controller.jump_to_page(" 4 "), Ok(4));
        assert_eq!(controller.state().current_page, 4);
        assert_eq!(controller.dispatcher_mut().drain(), vec![4]);

        assert_eq!(controller.jump_to_page("3.5"), Ok(3));
        assert_eq!(controller.jump_to_page("2abc"), Ok(2));
        assert_eq!(controller.dispatcher_mut().drain(), vec![3, 2]);
    }

    #[test]
    fn test_prev_and_next_stop_at_edges() {
        let mut controller = loaded_controller(2);
        assert!(!controller.can_go_prev());
        assert!(controller.can_go_next());
        assert!(controller.prev_page().is_err());

        assert_eq!(controller.next_page(), Ok(2));
        controller.on_fetch_settled(2, success(2, 30));
        assert!(controller.can_go_prev());
        assert!(!controller.can_go_next());
        assert!(controller.next_page().is_err());
        assert_eq!(controller.dispatcher_mut().drain(), vec![2]);
    }

    #[test]
    fn test_markers_follow_current_page() {
        let mut controller = loaded_controller(10);
        controller.request_page(5).unwrap();
        assert_eq!(
            controller.markers(),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_showing_range() {
        let mut controller = PageController::new(PendingFetches::new());
        assert_eq!(controller.showing_range(), None);

        controller.mount();
        controller.on_fetch_settled(1, success(12, 172));
        assert_eq!(controller.showing_range(), Some((1, 15)));

        controller.request_page(12).unwrap();
        controller.on_fetch_settled(12, success(12, 172));
        assert_eq!(controller.showing_range(), Some((166, 172)));
    }
}
