use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::{CommandOutput, restored_dashboard};
use crate::dashboard::Dashboard;
use crate::display::{
    CATEGORY_PLACEHOLDER, ReliabilityView, TerminalTicketTable, channel_cards,
    format_reliability_colored, render_category_table, render_channel_cards,
};
use crate::display::summary::category_rows;
use crate::error::Result;

fn heading(title: &str) -> String {
    title
        .if_supports_color(Stream::Stdout, |t| t.bold())
        .to_string()
}

/// Every summary section of the displayed run followed by the first page of
/// the ticket list.
pub(super) fn summary_text(dashboard: &Dashboard) -> String {
    let mut sections = Vec::new();
    if let Some(label) = dashboard.last_run_label() {
        sections.push(
            label
                .if_supports_color(Stream::Stdout, |t| t.dimmed())
                .to_string(),
        );
    }

    let Some(result) = dashboard.result() else {
        sections.push(CATEGORY_PLACEHOLDER.to_string());
        return sections.join("\n\n");
    };

    sections.push(format!(
        "{}\n{}",
        heading("카테고리별 현황"),
        render_category_table(&result.category_info)
    ));

    if !result.channel_info.is_empty() {
        let cards = channel_cards(&result.channel_info);
        sections.push(format!(
            "{}\n{}",
            heading("채널별 현황"),
            render_channel_cards(&cards).trim_end()
        ));
    }

    let reliability =
        ReliabilityView::build(&result.reliability_info, &result.ui.accuracy_color_thresholds);
    sections.push(format!(
        "{}\n{}",
        heading("분류 신뢰도"),
        format_reliability_colored(&reliability)
    ));

    sections.push(
        TerminalTicketTable::render(&dashboard.list().render())
            .trim_end()
            .to_string(),
    );
    sections.join("\n\n")
}

/// Show the summary of the last run.
pub fn cmd_summary(output_json: bool) -> Result<()> {
    let dashboard = restored_dashboard();

    let json_output = match dashboard.result() {
        Some(result) => json!({
            "last_run_label": dashboard.last_run_label(),
            "categories": category_rows(&result.category_info),
            "channels": channel_cards(&result.channel_info),
            "reliability": ReliabilityView::build(
                &result.reliability_info,
                &result.ui.accuracy_color_thresholds,
            ),
            "total_tickets": result.meta.total_tickets,
        }),
        None => json!({
            "last_run_label": null,
            "categories": [],
            "channels": [],
            "reliability": null,
            "total_tickets": 0,
        }),
    };

    CommandOutput::new(json_output)
        .with_text(summary_text(&dashboard))
        .print(output_json)
}
