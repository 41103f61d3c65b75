//! Contact form webhook.
//!
//! Accepts `name`, `email` and `message` either as form-encoded parameters
//! or as a JSON body, and appends `(name, email, message, received time)` to
//! a worksheet. The handler never fails: every problem is reported in the
//! `{success, error}` response.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AutoclassError, Result};
use crate::utils::date::kst;

pub const NO_REQUEST_MESSAGE: &str = "요청 파라미터가 없습니다.";
pub const NO_REQUEST_DATA_MESSAGE: &str = "요청 데이터를 찾을 수 없습니다.";
pub const PARSE_ERROR_PREFIX: &str = "데이터 파싱 오류: ";
pub const MISSING_FIELDS_MESSAGE: &str = "필수 필드가 누락되었습니다.";
pub const NO_SHEET_MESSAGE: &str = "시트를 찾을 수 없습니다.";

const SHEET_EXTENSION: &str = "jsonl";

/// An incoming webhook request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookRequest {
    /// Decoded form parameters, when the body was form-encoded.
    pub parameters: Option<BTreeMap<String, String>>,
    /// Raw body, when it was not form-encoded.
    pub post_body: Option<String>,
}

impl WebhookRequest {
    /// Build a request from a raw body and its content type. Form-encoded
    /// bodies are decoded into parameters; anything else is kept raw.
    pub fn from_body(content_type: &str, body: &str) -> Self {
        if body.trim().is_empty() {
            return Self::default();
        }
        if content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("application/x-www-form-urlencoded")
        {
            let parameters = url::form_urlencoded::parse(body.as_bytes())
                .into_owned()
                .collect();
            Self {
                parameters: Some(parameters),
                post_body: None,
            }
        } else {
            Self {
                parameters: None,
                post_body: Some(body.to_string()),
            }
        }
    }
}

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// `{success, message?, error?}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: Some("Success".to_string()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// A spreadsheet-like sink of rows grouped into named sheets.
pub trait Workbook {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Result<Vec<String>>;

    fn append_row(&mut self, sheet: &str, row: &[String]) -> Result<()>;

    fn rows(&self, sheet: &str) -> Result<Vec<Vec<String>>>;
}

/// Extract the three fields, from parameters first and the JSON body
/// second.
fn extract_fields(request: &WebhookRequest) -> std::result::Result<[Option<String>; 3], String> {
    if let Some(params) = &request.parameters {
        let field = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();
        return Ok([field("name"), field("email"), field("message")]);
    }

    let Some(body) = &request.post_body else {
        return Err(NO_REQUEST_DATA_MESSAGE.to_string());
    };
    let value: Value =
        serde_json::from_str(body).map_err(|e| format!("{PARSE_ERROR_PREFIX}{e}"))?;
    let field = |key: &str| match value.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Some(Value::Bool(true)) => Some("true".to_string()),
        _ => None,
    };
    Ok([field("name"), field("email"), field("message")])
}

/// Parse and validate a request into a submission.
pub fn parse_submission(request: &WebhookRequest) -> std::result::Result<ContactSubmission, String> {
    match extract_fields(request)? {
        [Some(name), Some(email), Some(message)] => Ok(ContactSubmission {
            name,
            email,
            message,
        }),
        _ => Err(MISSING_FIELDS_MESSAGE.to_string()),
    }
}

/// `preferred` if the workbook has it, else its first sheet.
pub fn resolve_sheet<W>(workbook: &W, preferred: &str) -> Result<Option<String>>
where
    W: Workbook + ?Sized,
{
    let names = workbook.sheet_names()?;
    if names.iter().any(|n| n == preferred) {
        return Ok(Some(preferred.to_string()));
    }
    tracing::debug!(preferred, available = %names.join(", "), "preferred sheet not found");
    Ok(names.into_iter().next())
}

/// Handle one webhook call. `request` is `None` when nothing was sent at
/// all.
pub fn handle_contact<W>(
    request: Option<&WebhookRequest>,
    workbook: &mut W,
    preferred_sheet: &str,
    now: Timestamp,
) -> WebhookResponse
where
    W: Workbook + ?Sized,
{
    let Some(request) = request else {
        return WebhookResponse::failure(NO_REQUEST_MESSAGE);
    };

    let submission = match parse_submission(request) {
        Ok(submission) => submission,
        Err(message) => {
            tracing::warn!(%message, "rejected contact submission");
            return WebhookResponse::failure(message);
        }
    };

    match append_submission(workbook, preferred_sheet, &submission, now) {
        Ok(Some(sheet)) => {
            tracing::info!(%sheet, "contact submission appended");
            WebhookResponse::ok()
        }
        Ok(None) => WebhookResponse::failure(NO_SHEET_MESSAGE),
        Err(e) => {
            tracing::warn!(error = %e, "failed to append contact submission");
            WebhookResponse::failure(e.to_string())
        }
    }
}

fn append_submission<W>(
    workbook: &mut W,
    preferred_sheet: &str,
    submission: &ContactSubmission,
    now: Timestamp,
) -> Result<Option<String>>
where
    W: Workbook + ?Sized,
{
    let Some(sheet) = resolve_sheet(workbook, preferred_sheet)? else {
        return Ok(None);
    };
    let received = now.to_zoned(kst()).strftime("%Y-%m-%d %H:%M:%S").to_string();
    workbook.append_row(
        &sheet,
        &[
            submission.name.clone(),
            submission.email.clone(),
            submission.message.clone(),
            received,
        ],
    )?;
    Ok(Some(sheet))
}

/// Workbook stored as a directory with one JSON-lines file per sheet.
#[derive(Debug, Clone)]
pub struct DirWorkbook {
    dir: PathBuf,
}

impl DirWorkbook {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open `dir`, creating it with an empty `default_sheet` when it holds
    /// no sheets yet.
    pub fn open_or_init(dir: impl Into<PathBuf>, default_sheet: &str) -> Result<Self> {
        let workbook = Self::new(dir);
        fs::create_dir_all(&workbook.dir)?;
        if workbook.sheet_names()?.is_empty() {
            workbook.create_sheet(default_sheet)?;
        }
        Ok(workbook)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn create_sheet(&self, name: &str) -> Result<()> {
        validate_sheet_name(name)?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.sheet_path(name))?;
        Ok(())
    }

    fn sheet_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{SHEET_EXTENSION}"))
    }
}

fn validate_sheet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(AutoclassError::Webhook(format!("invalid sheet name '{name}'")));
    }
    Ok(())
}

impl Workbook for DirWorkbook {
    fn sheet_names(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(SHEET_EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn append_row(&mut self, sheet: &str, row: &[String]) -> Result<()> {
        validate_sheet_name(sheet)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.sheet_path(sheet))?;
        let line = serde_json::to_string(row)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn rows(&self, sheet: &str) -> Result<Vec<Vec<String>>> {
        validate_sheet_name(sheet)?;
        let file = match fs::File::open(self.sheet_path(sheet)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut rows = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(serde_json::from_str(&line)?);
        }
        Ok(rows)
    }
}

/// In-memory workbook, in sheet insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Vec<Vec<String>>)>,
}

impl MemoryWorkbook {
    pub fn with_sheets(names: &[&str]) -> Self {
        Self {
            sheets: names.iter().map(|n| (n.to_string(), Vec::new())).collect(),
        }
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Result<Vec<String>> {
        Ok(self.sheets.iter().map(|(name, _)| name.clone()).collect())
    }

    fn append_row(&mut self, sheet: &str, row: &[String]) -> Result<()> {
        let (_, rows) = self
            .sheets
            .iter_mut()
            .find(|(name, _)| name == sheet)
            .ok_or_else(|| AutoclassError::Webhook(format!("no sheet named '{sheet}'")))?;
        rows.push(row.to_vec());
        Ok(())
    }

    fn rows(&self, sheet: &str) -> Result<Vec<Vec<String>>> {
        Ok(self
            .sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}
