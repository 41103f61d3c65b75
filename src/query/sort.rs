//! Sort functions for the ticket working set.
//!
//! Every sort is stable: tickets that compare equal keep their prior
//! relative order.

use std::cmp::{Ordering, Reverse};

use unicase::UniCase;

use crate::enum_display_fromstr;
use crate::error::AutoclassError;
use crate::ticket::Ticket;
use crate::types::confidence_rank;

/// Sort order for the ticket list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    ConfidenceDesc,
    ConfidenceAsc,
    Category,
    Channel,
}

impl SortKey {
    /// All valid string representations of this enum.
    pub const ALL_STRINGS: &[&str] = &[
        "date-desc",
        "date-asc",
        "confidence-desc",
        "confidence-asc",
        "category",
        "channel",
    ];
}

enum_display_fromstr!(SortKey, AutoclassError::invalid_sort_key, {
    DateDesc => "date-desc",
    DateAsc => "date-asc",
    ConfidenceDesc => "confidence-desc",
    ConfidenceAsc => "confidence-asc",
    Category => "category",
    Channel => "channel",
});

/// Newest first. Tickets with an unparseable `received_at` go last.
pub fn sort_by_date_desc(tickets: &mut [Ticket]) {
    tickets.sort_by_cached_key(|t| {
        let at = t.received_timestamp();
        (at.is_none(), Reverse(at))
    });
}

/// Oldest first. Tickets with an unparseable `received_at` go last.
pub fn sort_by_date_asc(tickets: &mut [Ticket]) {
    tickets.sort_by_cached_key(|t| {
        let at = t.received_timestamp();
        (at.is_none(), at)
    });
}

/// Highest confidence grade first
pub fn sort_by_confidence_desc(tickets: &mut [Ticket]) {
    tickets.sort_by_key(|t| Reverse(confidence_rank(&t.confidence)));
}

/// Lowest confidence grade first
pub fn sort_by_confidence_asc(tickets: &mut [Ticket]) {
    tickets.sort_by_key(|t| confidence_rank(&t.confidence));
}

/// Locale-style string ordering: case-folded first, raw string as the
/// tiebreaker so the order stays total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    UniCase::new(a)
        .cmp(&UniCase::new(b))
        .then_with(|| a.cmp(b))
}

/// Sort tickets by the specified key
pub fn sort_tickets_by(tickets: &mut [Ticket], key: SortKey) {
    match key {
        SortKey::DateDesc => sort_by_date_desc(tickets),
        SortKey::DateAsc => sort_by_date_asc(tickets),
        SortKey::ConfidenceDesc => sort_by_confidence_desc(tickets),
        SortKey::ConfidenceAsc => sort_by_confidence_asc(tickets),
        SortKey::Category => tickets.sort_by(|a, b| locale_cmp(&a.category, &b.category)),
        SortKey::Channel => tickets.sort_by(|a, b| locale_cmp(&a.channel, &b.channel)),
    }
}
