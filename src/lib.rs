pub mod macros;

pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod list;
pub mod logging;
pub mod paths;
pub mod payload;
pub mod query;
pub mod remote;
pub mod report;
pub mod snapshot;
pub mod ticket;
pub mod toast;
pub mod types;
pub mod utils;
pub mod webhook;

pub use config::Config;
pub use dashboard::{Dashboard, load_stats};
pub use error::{AutoclassError, Result};
pub use list::{RenderModel, TableBody, TicketListController, TicketTableRenderer};
pub use payload::ClassificationResult;
pub use query::{DateWindow, FilterCriteria, SortKey};
pub use snapshot::SnapshotStore;
pub use ticket::{BucketsByCategory, RawTicket, Ticket, flatten_by_category};
pub use toast::{Notifier, Toast, ToastLevel};
pub use types::{Category, Confidence, Engine, PAGE_SIZE};
