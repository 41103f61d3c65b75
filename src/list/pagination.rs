//! Page arithmetic and the pagination control strip.

use serde::Serialize;

/// Most numbered page buttons shown at once.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Index range of `page` (1-indexed) within a list of `count` items.
pub fn page_bounds(page: usize, page_size: usize, count: usize) -> (usize, usize) {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(count);
    let end = start.saturating_add(page_size).min(count);
    (start, end)
}

/// First and last numbered page button around `current`.
///
/// The window is centred on `current` and clamped to `[1, total]`; near the
/// edges it shifts so that up to [`MAX_PAGE_BUTTONS`] contiguous pages stay
/// visible.
pub fn page_window(current: usize, total: usize) -> (usize, usize) {
    let span = MAX_PAGE_BUTTONS - 1;
    let mut start = current.saturating_sub(MAX_PAGE_BUTTONS / 2).max(1);
    let end = (start + span).min(total);
    if end.saturating_sub(start) < span {
        start = end.saturating_sub(span).max(1);
    }
    (start, end)
}

/// One element of the pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageControl {
    Previous { target: usize, enabled: bool },
    Page { number: usize, active: bool },
    Ellipsis,
    Next { target: usize, enabled: bool },
}

/// Pagination strip for the ticket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationModel {
    pub current: usize,
    pub total: usize,
    pub controls: Vec<PageControl>,
}

impl PaginationModel {
    /// Build the strip. Returns `None` when there is at most one page.
    pub fn build(current: usize, total: usize) -> Option<Self> {
        if total <= 1 {
            return None;
        }

        let (start, end) = page_window(current, total);
        let mut controls = vec![PageControl::Previous {
            target: current.saturating_sub(1),
            enabled: current > 1,
        }];

        if start > 1 {
            controls.push(PageControl::Page {
                number: 1,
                active: false,
            });
            if start > 2 {
                controls.push(PageControl::Ellipsis);
            }
        }

        controls.extend((start..=end).map(|number| PageControl::Page {
            number,
            active: number == current,
        }));

        if end < total {
            if end < total - 1 {
                controls.push(PageControl::Ellipsis);
            }
            controls.push(PageControl::Page {
                number: total,
                active: false,
            });
        }

        controls.push(PageControl::Next {
            target: current + 1,
            enabled: current < total,
        });

        Some(Self {
            current,
            total,
            controls,
        })
    }

    /// Plain-text position label, e.g. `2 / 7 페이지`.
    pub fn label(&self) -> String {
        format!("{} / {} 페이지", self.current, self.total)
    }

    /// Numbers of the page buttons, in display order.
    pub fn page_numbers(&self) -> Vec<usize> {
        self.controls
            .iter()
            .filter_map(|c| match c {
                PageControl::Page { number, .. } => Some(*number),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(current: usize, total: usize) -> String {
        let model = PaginationModel::build(current, total).unwrap();
        model
            .controls
            .iter()
            .map(|c| match c {
                PageControl::Previous { enabled, .. } => {
                    (if *enabled { "<" } else { "(<)" }).to_string()
                }
                PageControl::Next { enabled, .. } => {
                    (if *enabled { ">" } else { "(>)" }).to_string()
                }
                PageControl::Ellipsis => "...".to_string(),
                PageControl::Page { number, active } => {
                    if *active {
                        format!("[{number}]")
                    } else {
                        number.to_string()
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(23, 10), 3);
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(1, 10, 23), (0, 10));
        assert_eq!(page_bounds(3, 10, 23), (20, 23));
        assert_eq!(page_bounds(4, 10, 23), (23, 23));
    }

    #[test]
    fn test_page_window_centres_and_shifts() {
        assert_eq!(page_window(1, 10), (1, 5));
        assert_eq!(page_window(3, 10), (1, 5));
        assert_eq!(page_window(5, 10), (3, 7));
        assert_eq!(page_window(9, 10), (6, 10));
        assert_eq!(page_window(10, 10), (6, 10));
        assert_eq!(page_window(2, 3), (1, 3));
        assert_eq!(page_window(4, 4), (1, 4));
    }

    #[test]
    fn test_no_strip_for_single_page() {
        assert!(PaginationModel::build(1, 1).is_none());
        assert!(PaginationModel::build(1, 0).is_none());
    }

    #[test]
    fn test_strip_at_start() {
        assert_eq!(strip(1, 10), "(<) [1] 2 3 4 5 ... 10 >");
    }

    #[test]
    fn test_strip_in_middle() {
        assert_eq!(strip(5, 10), "< 1 ... 3 4 [5] 6 7 ... 10 >");
    }

    #[test]
    fn test_strip_at_end() {
        assert_eq!(strip(10, 10), "< 1 ... 6 7 8 9 [10] (>)");
    }

    #[test]
    fn test_strip_without_ellipsis_next_to_edges() {
        assert_eq!(strip(4, 6), "< 1 2 3 [4] 5 6 >");
        assert_eq!(strip(3, 6), "< 1 2 [3] 4 5 6 >");
        assert_eq!(strip(2, 3), "< 1 [2] 3 >");
    }

    #[test]
    fn test_label() {
        let model = PaginationModel::build(2, 7).unwrap();
        assert_eq!(model.label(), "2 / 7 페이지");
        assert_eq!(model.page_numbers(), vec![1, 2, 3, 4, 5, 7]);
    }
}
