//! Trait-based ticket filters.
//!
//! Each active criterion becomes one [`TicketFilter`]; a ticket passes when
//! every filter matches. Inactive criteria contribute no filter at all.

use jiff::Timestamp;

use crate::enum_display_fromstr;
use crate::error::AutoclassError;
use crate::ticket::Ticket;
use crate::utils::date::days_between;
use crate::utils::text::{contains_folded, fold_case};

/// Evaluation time shared by every filter in one pass
#[derive(Debug, Clone, Copy)]
pub struct FilterContext {
    /// Reference point for date windows.
    pub now: Timestamp,
}

impl FilterContext {
    pub fn new(now: Timestamp) -> Self {
        Self { now }
    }
}

/// One criterion a ticket must satisfy to stay in the filtered view
pub trait TicketFilter: Send + Sync {
    fn matches(&self, ticket: &Ticket, context: &FilterContext) -> bool;
}

/// Case-insensitive substring match over content, channel and category
pub struct SearchFilter {
    /// Case-folded search term.
    needle: String,
}

impl SearchFilter {
    pub fn new(term: &str) -> Self {
        Self {
            needle: fold_case(term.trim()),
        }
    }
}

impl TicketFilter for SearchFilter {
    fn matches(&self, ticket: &Ticket, _context: &FilterContext) -> bool {
        [&ticket.content, &ticket.channel, &ticket.category]
            .iter()
            .any(|field| contains_folded(field, &self.needle))
    }
}

/// How far back `received_at` may lie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    Today,
    Week,
    Month,
    Quarter,
}

enum_display_fromstr!(DateWindow, AutoclassError::invalid_date_window, {
    Today => "today",
    Week => "week",
    Month => "month",
    Quarter => "quarter",
});

impl DateWindow {
    /// Largest allowed whole-day age.
    pub fn max_days(self) -> i64 {
        match self {
            DateWindow::Today => 0,
            DateWindow::Week => 7,
            DateWindow::Month => 30,
            DateWindow::Quarter => 90,
        }
    }
}

/// Keep tickets received within a [`DateWindow`]. Tickets whose
/// `received_at` cannot be parsed never match.
pub struct DateWindowFilter {
    window: DateWindow,
}

impl DateWindowFilter {
    pub fn new(window: DateWindow) -> Self {
        Self { window }
    }
}

impl TicketFilter for DateWindowFilter {
    fn matches(&self, ticket: &Ticket, context: &FilterContext) -> bool {
        ticket
            .received_timestamp()
            .is_some_and(|at| days_between(context.now, at) <= self.window.max_days())
    }
}

/// Exact channel match
pub struct ChannelFilter {
    channel: String,
}

impl ChannelFilter {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }
}

impl TicketFilter for ChannelFilter {
    fn matches(&self, ticket: &Ticket, _context: &FilterContext) -> bool {
        ticket.channel == self.channel
    }
}

/// Exact category match
pub struct CategoryFilter {
    category: String,
}

impl CategoryFilter {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl TicketFilter for CategoryFilter {
    fn matches(&self, ticket: &Ticket, _context: &FilterContext) -> bool {
        ticket.category == self.category
    }
}

/// The user's current filter selections.
///
/// Empty strings and `None` both mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub date_window: Option<DateWindow>,
    pub channel: Option<String>,
    pub category: Option<String>,
}

impl FilterCriteria {
    /// Returns true if no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.filters().is_empty()
    }

    /// Build one filter per active criterion.
    pub fn filters(&self) -> Vec<Box<dyn TicketFilter>> {
        let mut filters: Vec<Box<dyn TicketFilter>> = Vec::new();

        if !self.search.trim().is_empty() {
            filters.push(Box::new(SearchFilter::new(&self.search)));
        }
        if let Some(window) = self.date_window {
            filters.push(Box::new(DateWindowFilter::new(window)));
        }
        if let Some(channel) = self.channel.as_deref().filter(|c| !c.is_empty()) {
            filters.push(Box::new(ChannelFilter::new(channel)));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            filters.push(Box::new(CategoryFilter::new(category)));
        }

        filters
    }

    /// Return the tickets that satisfy every active criterion, in input order.
    pub fn apply(&self, tickets: &[Ticket], context: &FilterContext) -> Vec<Ticket> {
        let filters = self.filters();
        tickets
            .iter()
            .filter(|t| filters.iter().all(|f| f.matches(t, context)))
            .cloned()
            .collect()
    }
}
