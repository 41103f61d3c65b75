//! Pure render model for the ticket table.
//!
//! [`render_page`] turns list state into a [`RenderModel`]; a
//! [`TicketTableRenderer`] paints that model onto whatever surface the host
//! uses.

use serde::Serialize;

use crate::list::pagination::{PaginationModel, page_bounds, total_pages};
use crate::ticket::Ticket;
use crate::types::PAGE_SIZE;
use crate::utils::text::{format_count, join_keywords, preview};

/// Placeholder text when nothing has been loaded yet.
pub const NO_DATA_MESSAGE: &str = "티켓 데이터가 없습니다.";

/// Placeholder text when filters exclude every ticket.
pub const NO_RESULTS_MESSAGE: &str = "검색 결과가 없습니다.";

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub received_at: String,
    pub channel: String,
    pub content: String,
    pub category: String,
    pub keywords: String,
    pub confidence: String,
}

impl From<&Ticket> for TableRow {
    fn from(ticket: &Ticket) -> Self {
        Self {
            received_at: ticket.received_at.clone(),
            channel: ticket.channel.clone(),
            content: preview(&ticket.content),
            category: ticket.category.clone(),
            keywords: join_keywords(&ticket.keywords),
            confidence: ticket.confidence.clone(),
        }
    }
}

/// Table body: either placeholder state or the rows of the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "rows", rename_all = "snake_case")]
pub enum TableBody {
    NoData,
    NoResults,
    Rows(Vec<TableRow>),
}

impl TableBody {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            TableBody::NoData => Some(NO_DATA_MESSAGE),
            TableBody::NoResults => Some(NO_RESULTS_MESSAGE),
            TableBody::Rows(_) => None,
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        match self {
            TableBody::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Everything a renderer needs to paint the ticket card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    /// Size of the working set.
    pub count: usize,
    pub body: TableBody,
    /// `None` when there is at most one page.
    pub pagination: Option<PaginationModel>,
    /// Set when the host should bring the ticket table into view.
    pub scroll_into_view: bool,
}

impl RenderModel {
    /// Count label, e.g. `총 1,234건`.
    pub fn count_label(&self) -> String {
        format!("총 {}건", format_count(self.count as u64))
    }
}

/// Render `page` of the working set.
///
/// `all_count` is the size of the full ticket set and only decides which
/// placeholder an empty page shows.
pub fn render_page(all_count: usize, filtered: &[Ticket], page: usize) -> RenderModel {
    let total = total_pages(filtered.len(), PAGE_SIZE);
    let (start, end) = page_bounds(page, PAGE_SIZE, filtered.len());
    let slice = &filtered[start..end];

    if slice.is_empty() {
        let body = if filtered.is_empty() && all_count > 0 {
            TableBody::NoResults
        } else {
            TableBody::NoData
        };
        return RenderModel {
            count: filtered.len(),
            body,
            pagination: None,
            scroll_into_view: false,
        };
    }

    RenderModel {
        count: filtered.len(),
        body: TableBody::Rows(slice.iter().map(TableRow::from).collect()),
        pagination: PaginationModel::build(page, total),
        scroll_into_view: false,
    }
}

/// Paints render models onto a host surface.
pub trait TicketTableRenderer {
    fn paint(&mut self, model: &RenderModel);
}
