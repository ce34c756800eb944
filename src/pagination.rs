//! Pagination range computation.
//!
//! Turns (current page, total pages) into the ordered sequence of markers
//! the pagination bar renders: concrete page numbers with long runs of
//! hidden pages collapsed into ellipses. Page 1 and the last page are
//! always present, the current page is always present, and the bar never
//! grows beyond seven markers no matter how many pages exist.

/// One marker in a rendered pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    /// A concrete, navigable page number.
    Page(u32),
    /// A collapsed run of hidden pages.
    Ellipsis,
}

/// Pages shown on each side of the current page in the middle segment.
const SIBLINGS: u32 = 1;

/// Contiguous pages shown when the current page sits near either edge.
const EDGE_WINDOW: u32 = 2 * SIBLINGS + 3;

/// Widest possible bar: both edges, the sibling window, and two ellipses.
const MAX_MARKERS: u32 = 2 * SIBLINGS + 5;

/// Compute the ordered marker sequence for a pagination bar.
///
/// `current` is clamped into `1..=total` before use, so an out-of-range
/// page never produces a malformed bar. `total == 0` yields an empty
/// sequence and the caller is expected to render nothing.
pub fn page_range(current: u32, total: u32) -> Vec<PageMarker> {
    use PageMarker::{Ellipsis, Page};

    if total == 0 {
        return Vec::new();
    }
    if total <= MAX_MARKERS {
        return (1..=total).map(Page).collect();
    }

    let current = current.clamp(1, total);
    let left_sibling = current.saturating_sub(SIBLINGS).max(1);
    let right_sibling = (current + SIBLINGS).min(total);

    let left_gap = left_sibling > 2;
    let right_gap = right_sibling < total - 2;

    if !left_gap && right_gap {
        // Near the start: first five pages, then a gap, then the last.
        let mut markers: Vec<PageMarker> = (1..=EDGE_WINDOW).map(Page).collect();
        markers.push(Ellipsis);
        markers.push(Page(total));
        markers
    } else if left_gap && !right_gap {
        // Near the end: first page, a gap, then the last five.
        let mut markers = vec![Page(1), Ellipsis];
        markers.extend((total - EDGE_WINDOW + 1..=total).map(Page));
        markers
    } else {
        // Middle: both edges with the sibling window between two gaps.
        let mut markers = vec![Page(1), Ellipsis];
        markers.extend((left_sibling..=right_sibling).map(Page));
        markers.push(Ellipsis);
        markers.push(Page(total));
        markers
    }
}
