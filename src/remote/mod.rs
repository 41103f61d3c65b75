//! HTTP collaborators of the dashboard.
//!
//! The traits here are the seams the dashboard, report and stats flows are
//! written against; [`ApiClient`] is the reqwest-backed implementation.

pub mod client;

use serde_json::Value;

use crate::error::Result;
use crate::payload::{ClassificationStats, LatestUpload, RunRequest, StatsSelector};

pub use client::ApiClient;

/// Outcome of a report email request that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDelivery {
    /// The server answered 2xx with `success: true`.
    pub delivered: bool,
    /// Server-provided error text, if any.
    pub error: Option<String>,
}

/// Classification endpoints
#[async_trait::async_trait]
pub trait ClassificationApi: Send + Sync {
    /// Run a classification and return the raw response body.
    async fn run_classification(&self, request: &RunRequest) -> Result<Value>;

    /// Latest upload (batch or single file) of `user_id`.
    async fn latest_upload(&self, user_id: u64) -> Result<Option<LatestUpload>>;

    /// Aggregated statistics for an upload.
    async fn classification_stats(
        &self,
        selector: StatsSelector,
    ) -> Result<Option<ClassificationStats>>;
}

/// Report endpoints
#[async_trait::async_trait]
pub trait ReportApi: Send + Sync {
    /// Id of the most recent report. `Ok(None)` when the server has none.
    async fn latest_report_id(&self) -> Result<Option<u64>>;

    /// Ask the server to email the PDF of `report_id` to `email`.
    async fn send_report_email(&self, report_id: u64, email: &str) -> Result<EmailDelivery>;
}
