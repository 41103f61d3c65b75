mod config;
mod contact;
mod email;
mod reset;
mod run;
mod show;
mod stats;
mod summary;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use contact::cmd_contact;
pub use email::cmd_email;
pub use reset::cmd_reset;
pub use run::cmd_run;
pub use show::{ShowOptions, cmd_show};
pub use stats::cmd_stats;
pub use summary::cmd_summary;

use serde_json::Value;

use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::snapshot::SnapshotStore;

/// Output of a command in both of its forms: the JSON value printed with
/// `--json` and the human-readable text printed otherwise.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print to stdout. Text output falls back to pretty JSON when no text
    /// was given.
    pub fn print(self, output_json: bool) -> Result<()> {
        match self.text {
            Some(text) if !output_json => println!("{text}"),
            _ => print_json(&self.json)?,
        }
        Ok(())
    }
}

/// Print a JSON value to stdout with pretty formatting
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A dashboard restored from the default snapshot directory.
fn restored_dashboard() -> Dashboard {
    let mut dashboard = Dashboard::new(SnapshotStore::open_default());
    dashboard.restore();
    dashboard
}
