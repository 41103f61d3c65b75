use crate::config::Config;
use crate::display::print_toast;
use crate::error::{AutoclassError, Result};
use crate::remote::ApiClient;
use crate::report::ReportEmailDialog;

/// Email a report PDF to `address`.
pub async fn cmd_email(address: &str, report_id: Option<u64>) -> Result<()> {
    let config = Config::load()?;
    let client = ApiClient::from_config(&config)?;

    let dialog = ReportEmailDialog::open(&client, report_id)
        .await
        .map_err(|toast| AutoclassError::Other(toast.message))?;

    let outcome = dialog.submit(&client, address).await;
    if !outcome.close_dialog {
        return Err(AutoclassError::Other(outcome.toast.message));
    }
    print_toast(&outcome.toast);
    Ok(())
}
