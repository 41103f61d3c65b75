use jiff::Timestamp;
use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::{CommandOutput, restored_dashboard};
use crate::display::TerminalTicketTable;
use crate::error::{AutoclassError, Result};
use crate::query::{DateWindow, FilterCriteria, SortKey};

/// Options for `autoclass show`
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    pub search: Option<String>,
    pub date_window: Option<DateWindow>,
    pub channel: Option<String>,
    pub category: Option<String>,
    pub sort: Option<SortKey>,
    pub page: usize,
    pub output_json: bool,
}

impl ShowOptions {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone().unwrap_or_default(),
            date_window: self.date_window,
            channel: self.channel.clone(),
            category: self.category.clone(),
        }
    }
}

/// Show one page of the saved ticket list.
///
/// Without filter or sort options the tickets are listed in the order they
/// were loaded, as right after a run.
pub fn cmd_show(options: ShowOptions) -> Result<()> {
    let mut dashboard = restored_dashboard();
    let list = dashboard.list_mut();

    let criteria = options.criteria();
    if !criteria.is_empty() || options.sort.is_some() {
        if let Some(key) = options.sort {
            list.apply_sort(Some(key));
        }
        list.apply_filters_at(criteria, Timestamp::now());
    }

    let model = if options.page == 1 {
        list.render()
    } else {
        list.page(options.page).ok_or_else(|| {
            AutoclassError::InvalidInput(format!(
                "page {} is out of range (1-{})",
                options.page,
                list.total_pages()
            ))
        })?
    };

    let mut text = String::new();
    if let Some(label) = dashboard.last_run_label() {
        text.push_str(
            &label
                .if_supports_color(Stream::Stdout, |t| t.dimmed())
                .to_string(),
        );
        text.push('\n');
    }
    text.push_str(TerminalTicketTable::render(&model).trim_end());

    CommandOutput::new(json!({
        "last_run_label": dashboard.last_run_label(),
        "page": model,
    }))
    .with_text(text)
    .print(options.output_json)
}
