//! Top-level application configuration.
//!
//! Configuration is stored in `.autoclass/config.yaml` and includes:
//! - The classification API base URL and request timeout
//! - The user id and engine sent with classification runs
//! - The worksheet name contact submissions are appended to

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AutoclassError, Result};
use crate::paths;
use crate::types::Engine;

/// Keys accepted by `autoclass config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api_url",
    "user_id",
    "engine",
    "request_timeout",
    "workbook_sheet",
];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the classification API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// User id sent with classification and upload requests
    #[serde(default = "default_user_id")]
    pub user_id: u64,

    /// Engine used when `run` is not given one
    #[serde(default)]
    pub engine: Engine,

    /// HTTP request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Worksheet that contact submissions are appended to
    #[serde(default = "default_workbook_sheet")]
    pub workbook_sheet: String,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_user_id() -> u64 {
    1
}

fn default_request_timeout() -> u64 {
    30
}

fn default_workbook_sheet() -> String {
    "시트1".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_id: default_user_id(),
            engine: Engine::default(),
            request_timeout: default_request_timeout(),
            workbook_sheet: default_workbook_sheet(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        paths::config_path()
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AutoclassError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AutoclassError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            AutoclassError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;
        Ok(())
    }

    /// API base URL from the environment or the config file, without a
    /// trailing slash
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var("AUTOCLASS_API_URL")
            && !url.is_empty()
        {
            return url.trim_end_matches('/').to_string();
        }
        self.api_url.trim_end_matches('/').to_string()
    }

    /// Get the request timeout duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Current value of a config key, formatted for display
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "api_url" => Ok(self.api_url.clone()),
            "user_id" => Ok(self.user_id.to_string()),
            "engine" => Ok(self.engine.to_string()),
            "request_timeout" => Ok(self.request_timeout.to_string()),
            "workbook_sheet" => Ok(self.workbook_sheet.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config key from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "api_url" => {
                let parsed = url::Url::parse(value).map_err(|e| {
                    AutoclassError::Config(format!("invalid api_url '{value}': {e}"))
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(AutoclassError::Config(format!(
                        "invalid api_url '{value}': scheme must be http or https"
                    )));
                }
                self.api_url = value.trim_end_matches('/').to_string();
            }
            "user_id" => {
                self.user_id = value.parse().map_err(|_| {
                    AutoclassError::Config(format!("invalid user_id '{value}': expected a number"))
                })?;
            }
            "engine" => self.engine = value.parse()?,
            "request_timeout" => {
                let seconds: u64 = value.parse().map_err(|_| {
                    AutoclassError::Config(format!(
                        "invalid request_timeout '{value}': expected seconds"
                    ))
                })?;
                if seconds == 0 {
                    return Err(AutoclassError::Config(
                        "request_timeout must be at least 1 second".to_string(),
                    ));
                }
                self.request_timeout = seconds;
            }
            "workbook_sheet" => {
                if value.is_empty() {
                    return Err(AutoclassError::Config(
                        "workbook_sheet cannot be empty".to_string(),
                    ));
                }
                self.workbook_sheet = value.to_string();
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> AutoclassError {
    AutoclassError::Config(format!(
        "unknown config key '{key}', expected one of: {}",
        CONFIG_KEYS.join(", ")
    ))
}
