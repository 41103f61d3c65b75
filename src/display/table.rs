//! Terminal painter for the ticket list.

use owo_colors::{OwoColorize, Stream};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::list::{PageControl, PaginationModel, RenderModel, TableRow, TicketTableRenderer};

#[derive(Tabled)]
struct TicketRowView {
    #[tabled(rename = "접수일시")]
    received_at: String,
    #[tabled(rename = "채널")]
    channel: String,
    #[tabled(rename = "내용")]
    content: String,
    #[tabled(rename = "카테고리")]
    category: String,
    #[tabled(rename = "키워드")]
    keywords: String,
    #[tabled(rename = "신뢰도")]
    confidence: String,
}

impl From<&TableRow> for TicketRowView {
    fn from(row: &TableRow) -> Self {
        Self {
            received_at: row.received_at.clone(),
            channel: row.channel.clone(),
            content: row.content.clone(),
            category: row.category.clone(),
            keywords: row.keywords.clone(),
            confidence: row.confidence.clone(),
        }
    }
}

/// Plain-text pagination strip, e.g. `‹ 1 … 4 [5] 6 … 10 ›  5 / 10 페이지`.
pub fn format_pagination(model: &PaginationModel) -> String {
    let controls: Vec<String> = model
        .controls
        .iter()
        .map(|control| match control {
            PageControl::Previous { enabled, .. } => {
                if *enabled { "‹".to_string() } else { " ".to_string() }
            }
            PageControl::Next { enabled, .. } => {
                if *enabled { "›".to_string() } else { " ".to_string() }
            }
            PageControl::Ellipsis => "…".to_string(),
            PageControl::Page { number, active: true } => format!("[{number}]"),
            PageControl::Page { number, .. } => number.to_string(),
        })
        .collect();
    format!("{}  {}", controls.join(" ").trim(), model.label())
}

/// Renders [`RenderModel`]s as text tables. Painted frames accumulate in an
/// internal buffer until taken.
#[derive(Debug, Default)]
pub struct TerminalTicketTable {
    buffer: String,
}

impl TerminalTicketTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything painted so far.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    pub fn render(model: &RenderModel) -> String {
        let mut out = String::new();
        out.push_str(
            &model
                .count_label()
                .if_supports_color(Stream::Stdout, |t| t.bold())
                .to_string(),
        );
        out.push('\n');

        match model.body.placeholder() {
            Some(message) => {
                out.push_str(
                    &message
                        .if_supports_color(Stream::Stdout, |t| t.dimmed())
                        .to_string(),
                );
                out.push('\n');
            }
            None => {
                let rows: Vec<TicketRowView> =
                    model.body.rows().iter().map(TicketRowView::from).collect();
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                out.push_str(&table.to_string());
                out.push('\n');
            }
        }

        if let Some(pagination) = &model.pagination {
            out.push_str(
                &format_pagination(pagination)
                    .if_supports_color(Stream::Stdout, |t| t.cyan())
                    .to_string(),
            );
            out.push('\n');
        }
        out
    }
}

impl TicketTableRenderer for TerminalTicketTable {
    fn paint(&mut self, model: &RenderModel) {
        self.buffer.push_str(&Self::render(model));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::render_page;
    use crate::ticket::Ticket;

    fn tickets(n: usize) -> Vec<Ticket> {
        (1..=n)
            .map(|i| Ticket {
                received_at: format!("2025-01-{:02} 09:00:00", i),
                channel: "전화".to_string(),
                content: format!("문의 {i}"),
                preview: String::new(),
                category: "배송".to_string(),
                keywords: vec![],
                confidence: "상".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_format_pagination() {
        let model = PaginationModel::build(1, 3).unwrap();
        assert_eq!(format_pagination(&model), "[1] 2 3 ›  1 / 3 페이지");

        let model = PaginationModel::build(5, 10).unwrap();
        assert_eq!(
            format_pagination(&model),
            "‹ 1 … 3 4 [5] 6 7 … 10 ›  5 / 10 페이지"
        );
    }

    #[test]
    fn test_paint_placeholder() {
        let mut table = TerminalTicketTable::new();
        table.paint(&render_page(0, &[], 1));
        let out = table.take_output();
        assert!(out.contains("총 0건"));
        assert!(out.contains("티켓 데이터가 없습니다."));
        assert!(table.take_output().is_empty());
    }

    #[test]
    fn test_paint_rows_and_pagination() {
        let all = tickets(12);
        let mut table = TerminalTicketTable::new();
        table.paint(&render_page(12, &all, 2));
        let out = table.take_output();
        assert!(out.contains("총 12건"));
        assert!(out.contains("접수일시"));
        assert!(out.contains("문의 11"));
        assert!(!out.contains("2025-01-10"));
        assert!(out.contains("2 / 2 페이지"));
    }
}
