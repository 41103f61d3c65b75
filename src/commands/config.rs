//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config set`: Set a configuration value
//! - `config get`: Print one configuration value

use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::CommandOutput;
use crate::config::{CONFIG_KEYS, Config};
use crate::error::Result;

fn key_label(key: &str) -> String {
    key.if_supports_color(Stream::Stdout, |t| t.cyan())
        .to_string()
}

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;

    let json_output = json!({
        "api_url": config.api_url(),
        "user_id": config.user_id,
        "engine": config.engine.to_string(),
        "request_timeout": config.request_timeout,
        "workbook_sheet": config.workbook_sheet,
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!(
        "{}\n\n",
        "Configuration:".if_supports_color(Stream::Stdout, |t| t.bold())
    ));
    for key in CONFIG_KEYS {
        let value = if *key == "api_url" {
            config.api_url()
        } else {
            config.get(key)?
        };
        text_output.push_str(&format!("{}: {value}\n", key_label(key)));
    }
    text_output.push('\n');
    text_output.push_str(
        &format!("Config file: {}", Config::config_path().display())
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string(),
    );

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output_json)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let stored = config.get(key)?;
    tracing::debug!(key, value = %stored, "config updated");

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": stored,
        "success": true,
    }))
    .with_text(format!("Set {} to {stored}", key_label(key)))
    .print(output_json)
}

/// Print a single configuration value
pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(value)
    .print(output_json)
}
