pub mod stats;
pub mod summary;
pub mod table;

use owo_colors::{OwoColorize, Stream};

pub use stats::{NO_STATS_MESSAGE, render_stats};
pub use summary::{
    CATEGORY_PLACEHOLDER, ChannelCard, ReliabilityState, ReliabilityView, channel_cards,
    render_category_table, render_channel_cards,
};
pub use table::{TerminalTicketTable, format_pagination};

use crate::toast::Toast;

/// Colour the reliability line by its state.
pub fn format_reliability_colored(view: &ReliabilityView) -> String {
    let text = view.render();
    match view.state {
        ReliabilityState::Good => text
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string(),
        ReliabilityState::Warn => text
            .if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string(),
        ReliabilityState::Bad => text
            .if_supports_color(Stream::Stdout, |t| t.red())
            .to_string(),
    }
}

/// Print a toast to stderr.
pub fn print_toast(toast: &Toast) {
    eprintln!("{}", toast.styled());
}
