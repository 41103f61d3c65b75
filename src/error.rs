use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoclassError {
    #[error("invalid sort key '{0}', expected one of: date-desc, date-asc, confidence-desc, confidence-asc, category, channel")]
    InvalidSortKey(String),

    #[error("invalid date window '{0}', expected one of: today, week, month, quarter")]
    InvalidDateWindow(String),

    #[error("invalid engine '{0}', expected 'rule' or 'ai'")]
    InvalidEngine(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook error: {0}")]
    Webhook(String),

    #[error("{0}")]
    Other(String),
}

impl AutoclassError {
    pub fn invalid_sort_key(s: String) -> Self {
        AutoclassError::InvalidSortKey(s)
    }

    pub fn invalid_date_window(s: String) -> Self {
        AutoclassError::InvalidDateWindow(s)
    }

    pub fn invalid_engine(s: String) -> Self {
        AutoclassError::InvalidEngine(s)
    }

    /// Message suitable for a toast: server-provided text as-is, everything
    /// else through `Display`.
    pub fn user_message(&self) -> String {
        match self {
            AutoclassError::Api(message) | AutoclassError::Webhook(message) => message.clone(),
            other => other.to_string(),
        }
    }
}


pub type Result<T> = std::result::Result<T, AutoclassError>;
