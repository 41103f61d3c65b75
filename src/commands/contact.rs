use jiff::Timestamp;

use super::print_json;
use crate::config::Config;
use crate::error::{AutoclassError, Result};
use crate::paths::workbook_dir;
use crate::utils::{is_stdin_tty, read_stdin};
use crate::webhook::{DirWorkbook, WebhookRequest, handle_contact};

/// Handle a contact form webhook whose body is piped on stdin. Prints the
/// JSON response; a rejected submission also fails the command.
pub fn cmd_contact(content_type: &str, sheet: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let mut workbook = DirWorkbook::open_or_init(workbook_dir(), &config.workbook_sheet)?;

    let request = if is_stdin_tty() {
        None
    } else {
        Some(WebhookRequest::from_body(content_type, &read_stdin()?))
    };

    let sheet = sheet.unwrap_or(&config.workbook_sheet);
    let response = handle_contact(request.as_ref(), &mut workbook, sheet, Timestamp::now());
    print_json(&serde_json::to_value(&response)?)?;

    match response.error {
        Some(error) if !response.success => Err(AutoclassError::Webhook(error)),
        _ => Ok(()),
    }
}
