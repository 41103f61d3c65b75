use serde_json::json;

use super::CommandOutput;
use crate::dashboard::Dashboard;
use crate::display::TerminalTicketTable;
use crate::error::Result;
use crate::snapshot::SnapshotStore;

/// Clear the saved run.
pub fn cmd_reset(output_json: bool) -> Result<()> {
    let store = SnapshotStore::open_default();
    let mut dashboard = Dashboard::new(store.clone());
    let model = dashboard.reset()?;

    CommandOutput::new(json!({
        "action": "reset",
        "snapshot_dir": store.dir().to_string_lossy(),
        "success": true,
    }))
    .with_text(TerminalTicketTable::render(&model).trim_end().to_string())
    .print(output_json)
}
