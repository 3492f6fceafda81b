use itertools::Itertools;
use std::fmt;

/// Pages shown verbatim before the pager starts collapsing runs into ellipses.
pub const MAX_VISIBLE_PAGES: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(page) => write!(f, "{}", page),
            PageMarker::Ellipsis => write!(f, "..."),
        }
    }
}

/// Compact pager row for `current_page` out of `total_pages`.
///
/// Up to seven pages are listed in full. Past that the row is the first
/// page, a window of one page either side of the current one, and the last
/// page, with an ellipsis wherever pages were skipped.
pub fn page_markers(current_page: u32, total_pages: u32) -> Vec<PageMarker> {
    let total_pages = total_pages.max(1);

    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageMarker::Page).collect();
    }

    let mut markers = vec![PageMarker::Page(1)];

    if current_page > 3 {
        markers.push(PageMarker::Ellipsis);
    }

    let start = current_page.saturating_sub(1).max(2);
    let end = current_page.saturating_add(1).min(total_pages - 1);
    markers.extend((start..=end).map(PageMarker::Page));

    if current_page < total_pages - 2 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.push(PageMarker::Page(total_pages));
    markers
}

/// Single-line rendering of a marker row with the current page bracketed,
/// e.g. `1 ... 4 [5] 6 ... 10`.
pub fn render_markers(markers: &[PageMarker], current_page: u32) -> String {
    markers
        .iter()
        .map(|marker| match marker {
            PageMarker::Page(page) if *page == current_page => format!("[{}]", page),
            other => other.to_string(),
        })
        .join(" ")
}
