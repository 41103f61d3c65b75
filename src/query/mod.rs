//! Filtering and sorting of the ticket working set.

pub mod filter;
pub mod sort;

pub use filter::{
    CategoryFilter, ChannelFilter, DateWindow, DateWindowFilter, FilterContext, FilterCriteria,
    SearchFilter, TicketFilter,
};
pub use sort::{SortKey, locale_cmp, sort_tickets_by};
