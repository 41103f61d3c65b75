//! Emailing the latest analysis report as a PDF.
//!
//! Opening the dialog resolves which report to send; submitting validates
//! the address and asks the server to deliver it. Every outcome is reported
//! as a toast, and the dialog only closes after a successful send.

use std::sync::LazyLock;

use regex::Regex;

use crate::remote::ReportApi;
use crate::toast::Toast;

pub const NO_REPORT_MESSAGE: &str = "생성된 리포트가 없습니다. 먼저 리포트를 생성해주세요.";
pub const REPORT_NOT_FOUND_MESSAGE: &str = "리포트를 찾을 수 없습니다. 먼저 리포트를 생성해주세요.";
pub const EMPTY_EMAIL_MESSAGE: &str = "이메일 주소를 입력해주세요.";
pub const INVALID_EMAIL_MESSAGE: &str = "올바른 이메일 주소를 입력해주세요.";
pub const SEND_FAILED_MESSAGE: &str = "PDF 전송에 실패했습니다.";
pub const SEND_ERROR_MESSAGE: &str = "PDF 전송 중 오류가 발생했습니다.";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("regex should compile"));

/// Loose shape check: something, `@`, something, `.`, something.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// An open "email me the report" dialog bound to one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportEmailDialog {
    report_id: u64,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailOutcome {
    pub toast: Toast,
    pub close_dialog: bool,
}

impl ReportEmailDialog {
    /// Open the dialog for `known_report_id`, or for the server's latest
    /// report when none is known. Returns the warning to show when there is
    /// no report to send.
    pub async fn open<A>(api: &A, known_report_id: Option<u64>) -> Result<Self, Toast>
    where
        A: ReportApi + ?Sized,
    {
        if let Some(report_id) = known_report_id {
            return Ok(Self { report_id });
        }

        match api.latest_report_id().await {
            Ok(Some(report_id)) => Ok(Self { report_id }),
            Ok(None) => Err(Toast::warning(NO_REPORT_MESSAGE)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to look up latest report");
                Err(Toast::warning(REPORT_NOT_FOUND_MESSAGE))
            }
        }
    }

    pub fn report_id(&self) -> u64 {
        self.report_id
    }

    /// Send the report to `email`. A single attempt; nothing is retried.
    pub async fn submit<A>(&self, api: &A, email: &str) -> EmailOutcome
    where
        A: ReportApi + ?Sized,
    {
        let email = email.trim();
        if email.is_empty() {
            return Self::keep_open(Toast::warning(EMPTY_EMAIL_MESSAGE));
        }
        if !is_valid_email(email) {
            return Self::keep_open(Toast::warning(INVALID_EMAIL_MESSAGE));
        }

        match api.send_report_email(self.report_id, email).await {
            Ok(delivery) if delivery.delivered => {
                tracing::info!(report_id = self.report_id, "report email sent");
                EmailOutcome {
                    toast: Toast::success(format!("PDF가 {email}로 전송되었습니다.")),
                    close_dialog: true,
                }
            }
            Ok(delivery) => Self::keep_open(Toast::error(
                delivery
                    .error
                    .unwrap_or_else(|| SEND_FAILED_MESSAGE.to_string()),
            )),
            Err(e) => {
                tracing::warn!(error = %e, "report email request failed");
                Self::keep_open(Toast::error(SEND_ERROR_MESSAGE))
            }
        }
    }

    fn keep_open(toast: Toast) -> EmailOutcome {
        EmailOutcome {
            toast,
            close_dialog: false,
        }
    }
}
