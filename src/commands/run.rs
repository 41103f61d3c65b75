use serde_json::json;

use super::CommandOutput;
use super::summary::summary_text;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::display::print_toast;
use crate::error::{AutoclassError, Result};
use crate::remote::ApiClient;
use crate::snapshot::SnapshotStore;
use crate::types::Engine;

/// Run a classification and show its summary.
pub async fn cmd_run(engine: Option<Engine>, output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let engine = engine.unwrap_or(config.engine);
    let client = ApiClient::from_config(&config)?;

    let mut dashboard = Dashboard::new(SnapshotStore::open_default());
    dashboard.restore();
    let succeeded = dashboard.run(&client, &config, engine).await;

    let toast = dashboard.notifier().take();
    if !succeeded {
        let message = toast
            .map(|t| t.message)
            .unwrap_or_else(|| "classification failed".to_string());
        return Err(AutoclassError::Other(message));
    }
    if let Some(toast) = &toast
        && !output_json
    {
        print_toast(toast);
    }

    let total = dashboard
        .result()
        .map(|r| r.meta.total_tickets)
        .unwrap_or_default();
    CommandOutput::new(json!({
        "action": "run",
        "engine": engine.to_string(),
        "total_tickets": total,
        "tickets_loaded": dashboard.list().all_tickets().len(),
        "last_run_label": dashboard.last_run_label(),
        "message": toast.map(|t| t.message),
    }))
    .with_text(summary_text(&dashboard))
    .print(output_json)
}
