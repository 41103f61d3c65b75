//! reqwest client for the classification server.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ClassificationApi, EmailDelivery, ReportApi};
use crate::config::Config;
use crate::error::{AutoclassError, Result};
use crate::payload::{
    ClassificationStats, Envelope, LatestReport, LatestUpload, RunRequest, StatsSelector,
};

const RUN_PATH: &str = "/api/classifications/run";
const STATS_PATH: &str = "/api/classifications/stats";
const LATEST_UPLOAD_PATH: &str = "/api/upload/latest-file";
const LATEST_REPORT_PATH: &str = "/api/report/latest";
const SEND_EMAIL_PATH: &str = "/send-pdf-email";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendEmailBody {
    #[serde(default)]
    success: bool,
    error: Option<String>,
}

impl ApiClient {
    /// Client for the configured API URL and timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url(), config.request_timeout())
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        url::Url::parse(base_url)
            .map_err(|e| AutoclassError::Config(format!("invalid api_url '{base_url}': {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into an API error, preferring the `{error}`
    /// field of the body.
    async fn error_from(response: Response) -> AutoclassError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        api_error(status, &body)
    }
}

/// Build the error for a non-2xx response from its status and body.
pub fn api_error(status: StatusCode, body: &str) -> AutoclassError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    tracing::warn!(status = status.as_u16(), %message, "API request failed");
    AutoclassError::Api(message)
}

#[async_trait::async_trait]
impl ClassificationApi for ApiClient {
    async fn run_classification(&self, request: &RunRequest) -> Result<Value> {
        tracing::debug!(engine = %request.engine, "running classification");
        let response = self
            .client
            .post(self.url(RUN_PATH))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(response.json().await?)
    }

    async fn latest_upload(&self, user_id: u64) -> Result<Option<LatestUpload>> {
        let response = self
            .client
            .post(self.url(LATEST_UPLOAD_PATH))
            .json(&json!({ "user_id": user_id }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let envelope: Envelope<LatestUpload> = response.json().await?;
        Ok(envelope.data)
    }

    async fn classification_stats(
        &self,
        selector: StatsSelector,
    ) -> Result<Option<ClassificationStats>> {
        let response = self
            .client
            .post(self.url(STATS_PATH))
            .json(&selector)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let envelope: Envelope<ClassificationStats> = response.json().await?;
        if !envelope.success {
            return Err(AutoclassError::Api(
                envelope
                    .error
                    .unwrap_or_else(|| "stats request was not successful".to_string()),
            ));
        }
        Ok(envelope.data)
    }
}

#[async_trait::async_trait]
impl ReportApi for ApiClient {
    async fn latest_report_id(&self) -> Result<Option<u64>> {
        let response = self.client.get(self.url(LATEST_REPORT_PATH)).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let envelope: Envelope<LatestReport> = response.json().await?;
        if !envelope.success {
            return Ok(None);
        }
        Ok(envelope.data.and_then(|d| d.report_id).filter(|id| *id != 0))
    }

    async fn send_report_email(&self, report_id: u64, email: &str) -> Result<EmailDelivery> {
        let response = self
            .client
            .post(self.url(SEND_EMAIL_PATH))
            .json(&json!({ "report_id": report_id, "email": email }))
            .send()
            .await?;

        let ok = response.status().is_success();
        let body: SendEmailBody = response.json().await?;
        Ok(EmailDelivery {
            delivered: ok && body.success,
            error: body.error.filter(|e| !e.is_empty()),
        })
    }
}
