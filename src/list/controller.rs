//! The ticket list controller.
//!
//! Owns the full ticket set and the derived working set, plus the current
//! filter, sort and page. Every operation is synchronous and returns the
//! render model the host should paint.

use jiff::Timestamp;

use crate::list::pagination::total_pages;
use crate::list::render::{RenderModel, render_page};
use crate::query::{DateWindow, FilterContext, FilterCriteria, SortKey, sort_tickets_by};
use crate::ticket::{BucketsByCategory, Ticket, flatten_by_category};
use crate::types::PAGE_SIZE;

#[derive(Debug, Clone)]
pub struct TicketListController {
    all_tickets: Vec<Ticket>,
    filtered_tickets: Vec<Ticket>,
    current_page: usize,
    criteria: FilterCriteria,
    sort: Option<SortKey>,
}

impl Default for TicketListController {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketListController {
    pub fn new() -> Self {
        Self {
            all_tickets: Vec::new(),
            filtered_tickets: Vec::new(),
            current_page: 1,
            criteria: FilterCriteria::default(),
            sort: Some(SortKey::default()),
        }
    }

    pub fn all_tickets(&self) -> &[Ticket] {
        &self.all_tickets
    }

    pub fn filtered_tickets(&self) -> &[Ticket] {
        &self.filtered_tickets
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_tickets.len(), PAGE_SIZE)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort
    }

    /// Replace the full set with freshly flattened buckets.
    ///
    /// The working set becomes a copy of the full set in flattened order and
    /// the first page is rendered. Filter and sort selections are kept but
    /// not applied until the next filter change.
    pub fn load(&mut self, buckets: &BucketsByCategory) -> RenderModel {
        self.all_tickets = flatten_by_category(buckets);
        self.filtered_tickets = self.all_tickets.clone();
        self.current_page = 1;
        tracing::debug!(tickets = self.all_tickets.len(), "loaded ticket buckets");
        self.render()
    }

    /// Drop every ticket and return to the initial empty state.
    pub fn clear(&mut self) -> RenderModel {
        *self = Self::new();
        self.render()
    }

    /// Recompute the working set from the full set using `now` as the
    /// reference for date windows, reapply the current sort and go back to
    /// page 1.
    pub fn apply_filters_at(&mut self, criteria: FilterCriteria, now: Timestamp) -> RenderModel {
        self.criteria = criteria;
        let context = FilterContext::new(now);
        self.filtered_tickets = self.criteria.apply(&self.all_tickets, &context);
        if let Some(key) = self.sort {
            sort_tickets_by(&mut self.filtered_tickets, key);
        }
        self.current_page = 1;
        tracing::debug!(
            matched = self.filtered_tickets.len(),
            total = self.all_tickets.len(),
            "applied ticket filters"
        );
        self.render()
    }

    /// [`apply_filters_at`](Self::apply_filters_at) with the current time.
    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> RenderModel {
        self.apply_filters_at(criteria, Timestamp::now())
    }

    /// Reorder the working set. `None` keeps the current order.
    ///
    /// The current page is kept.
    pub fn apply_sort(&mut self, key: Option<SortKey>) -> RenderModel {
        self.sort = key;
        if let Some(key) = key {
            sort_tickets_by(&mut self.filtered_tickets, key);
        }
        self.render()
    }

    /// Jump to `page`. Returns `None` and changes nothing when the page is
    /// out of range.
    pub fn page(&mut self, page: usize) -> Option<RenderModel> {
        let total = self.total_pages();
        if page < 1 || page > total {
            tracing::debug!(page, total, "rejected page request");
            return None;
        }
        self.current_page = page;
        let mut model = self.render();
        model.scroll_into_view = true;
        Some(model)
    }

    /// Render the current page without changing any state.
    pub fn render(&self) -> RenderModel {
        render_page(
            self.all_tickets.len(),
            &self.filtered_tickets,
            self.current_page,
        )
    }

    // Host event entry points.

    pub fn on_search_changed(&mut self, term: &str, now: Timestamp) -> RenderModel {
        let criteria = FilterCriteria {
            search: term.to_string(),
            ..self.criteria.clone()
        };
        self.apply_filters_at(criteria, now)
    }

    pub fn on_filter_changed(
        &mut self,
        date_window: Option<DateWindow>,
        channel: Option<String>,
        category: Option<String>,
        now: Timestamp,
    ) -> RenderModel {
        let criteria = FilterCriteria {
            search: self.criteria.search.clone(),
            date_window,
            channel,
            category,
        };
        self.apply_filters_at(criteria, now)
    }

    /// Sort selection changed. Unknown values keep the current order.
    pub fn on_sort_changed(&mut self, value: &str) -> RenderModel {
        let key = value.parse::<SortKey>().ok();
        if key.is_none() {
            tracing::debug!(value, "unknown sort key, keeping order");
        }
        self.apply_sort(key)
    }

    pub fn on_page_requested(&mut self, page: usize) -> Option<RenderModel> {
        self.page(page)
    }

    /// Reset every filter and the sort to date-desc, then reapply.
    pub fn on_filters_cleared(&mut self, now: Timestamp) -> RenderModel {
        self.sort = Some(SortKey::DateDesc);
        self.apply_filters_at(FilterCriteria::default(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::render::TableBody;
    use serde_json::json;

    fn now() -> Timestamp {
        "2025-03-31T03:00:00Z".parse().unwrap()
    }

    fn buckets(value: serde_json::Value) -> BucketsByCategory {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> BucketsByCategory {
        buckets(json!({
            "배송": [
                {"received_at": "2025-03-30 10:00:00", "channel": "전화", "content": "배송 지연 문의", "confidence": "중"},
                {"received_at": "2025-03-01 10:00:00", "channel": "이메일", "content": "배송 지연 항의", "confidence": "상"},
            ],
            "품질/하자": [
                {"received_at": "2025-03-31 08:00:00", "channel": "전화", "content": "제품 파손", "confidence": "상"},
            ],
            "결제": [
                {"received_at": "not a date", "channel": "채팅", "content": "결제 오류", "confidence": "하"},
            ],
        }))
    }

    #[test]
    fn test_load_flattens_and_resets() {
        let mut list = TicketListController::new();
        list.apply_filters_at(
            FilterCriteria {
                search: "x".to_string(),
                ..Default::default()
            },
            now(),
        );

        let model = list.load(&sample());
        assert_eq!(list.all_tickets().len(), 4);
        assert_eq!(list.filtered_tickets(), list.all_tickets());
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.all_tickets()[0].category, "품질/하자");
        assert_eq!(model.count, 4);
        assert_eq!(model.body.rows().len(), 4);
    }

    #[test]
    fn test_filters_recompute_from_full_set() {
        let mut list = TicketListController::new();
        list.load(&sample());

        list.apply_filters_at(
            FilterCriteria {
                channel: Some("채팅".to_string()),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(list.filtered_tickets().len(), 1);

        list.apply_filters_at(
            FilterCriteria {
                channel: Some("전화".to_string()),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(list.filtered_tickets().len(), 2);
    }

    #[test]
    fn test_filters_reapply_sort_and_reset_page() {
        let mut list = TicketListController::new();
        list.load(&sample());

        let model = list.apply_filters_at(FilterCriteria::default(), now());
        let contents: Vec<_> = list.filtered_tickets().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["제품 파손", "배송 지연 문의", "배송 지연 항의", "결제 오류"]);
        assert_eq!(list.current_page(), 1);
        assert!(!model.scroll_into_view);
    }

    #[test]
    fn test_filters_are_idempotent() {
        let mut list = TicketListController::new();
        list.load(&sample());
        let criteria = FilterCriteria {
            search: "배송".to_string(),
            date_window: Some(DateWindow::Quarter),
            ..Default::default()
        };

        list.apply_filters_at(criteria.clone(), now());
        let first = list.filtered_tickets().to_vec();
        list.apply_filters_at(criteria, now());
        assert_eq!(list.filtered_tickets(), first.as_slice());
    }

    #[test]
    fn test_no_results_vs_no_data() {
        let mut list = TicketListController::new();
        assert_eq!(list.render().body, TableBody::NoData);

        list.load(&sample());
        let model = list.on_search_changed("존재하지 않는 검색어", now());
        assert_eq!(model.body, TableBody::NoResults);
        assert_eq!(model.count_label(), "총 0건");
    }

    #[test]
    fn test_unknown_sort_keeps_order() {
        let mut list = TicketListController::new();
        list.load(&sample());
        let before = list.filtered_tickets().to_vec();

        list.on_sort_changed("priority");
        assert_eq!(list.filtered_tickets(), before.as_slice());
        assert_eq!(list.sort_key(), None);
    }

    #[test]
    fn test_sort_changed_reorders() {
        let mut list = TicketListController::new();
        list.load(&sample());

        list.on_sort_changed("confidence-asc");
        let grades: Vec<_> = list.filtered_tickets().iter().map(|t| t.confidence.as_str()).collect();
        assert_eq!(grades, vec!["하", "중", "상", "상"]);
    }

    #[test]
    fn test_search_keeps_other_filters() {
        let mut list = TicketListController::new();
        list.load(&sample());

        list.on_filter_changed(None, Some("전화".to_string()), None, now());
        let model = list.on_search_changed("배송", now());
        assert_eq!(model.count, 1);
        assert_eq!(list.criteria().channel.as_deref(), Some("전화"));
    }

    #[test]
    fn test_clear_filters_restores_full_set() {
        let mut list = TicketListController::new();
        list.load(&sample());
        list.on_sort_changed("channel");
        list.on_search_changed("파손", now());

        let model = list.on_filters_cleared(now());
        assert_eq!(model.count, 4);
        assert_eq!(list.sort_key(), Some(SortKey::DateDesc));
        assert!(list.criteria().is_empty());
    }

    #[test]
    fn test_page_requests() {
        let mut list = TicketListController::new();
        assert!(list.page(1).is_none());

        list.load(&sample());
        assert!(list.page(0).is_none());
        assert!(list.page(2).is_none());
        let model = list.page(1).unwrap();
        assert!(model.scroll_into_view);
    }

    #[test]
    fn test_clear_returns_to_initial_state() {
        let mut list = TicketListController::new();
        list.load(&sample());
        let model = list.clear();
        assert!(list.all_tickets().is_empty());
        assert_eq!(model.body, TableBody::NoData);
    }
}
