//! Response bodies of the classification API.
//!
//! Every section is optional on the wire. Missing sections and fields fall
//! back to their defaults so a partial payload still renders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ticket::BucketsByCategory;

/// Result of `POST /api/classifications/run`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationResult {
    pub category_info: Vec<CategoryInfo>,
    pub channel_info: Vec<ChannelInfo>,
    pub reliability_info: ReliabilityInfo,
    pub ui: UiSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<TicketsSection>,
    pub meta: RunMeta,
}

impl ClassificationResult {
    /// Ticket buckets, if the payload carried any.
    pub fn buckets(&self) -> Option<&BucketsByCategory> {
        self.tickets.as_ref()?.all_by_category.as_ref()
    }
}

/// One row of the per-category summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryInfo {
    pub category: String,
    pub count: u64,
    /// Share of all tickets as a fraction in `[0, 1]`.
    pub ratio: f64,
    pub keywords: Vec<String>,
}

/// Ticket counts for one intake channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelInfo {
    pub channel: String,
    pub count: u64,
    pub by_category: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliabilityInfo {
    pub total_tickets: u64,
    /// Mean classifier confidence in `[0, 1]`.
    pub average_confidence: f64,
    pub high_confidence_count: u64,
    pub low_confidence_count: u64,
    pub needs_review_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub accuracy_color_thresholds: AccuracyThresholds,
}

/// Average-confidence cut-offs for the reliability badge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyThresholds {
    pub good: f64,
    pub warn: f64,
}

impl Default for AccuracyThresholds {
    fn default() -> Self {
        Self {
            good: 0.90,
            warn: 0.75,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_by_category: Option<BucketsByCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunMeta {
    pub total_tickets: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_name: Option<String>,
}

/// Request body of `POST /api/classifications/run`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRequest {
    pub user_id: u64,
    /// `0` selects the most recent upload.
    pub file_id: u64,
    pub engine: crate::types::Engine,
}

/// Generic `{success, data, error}` envelope used by the report and stats
/// endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `data` of `GET /api/report/latest`.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestReport {
    pub report_id: Option<u64>,
}

/// `data` of `POST /api/upload/latest-file`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LatestUpload {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub file_id: Option<u64>,
    pub batch_id: Option<u64>,
}

/// Selector for the stats endpoint. A batch wins over a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsSelector {
    BatchId(u64),
    FileId(u64),
}

impl LatestUpload {
    pub fn selector(&self) -> Option<StatsSelector> {
        self.batch_id
            .map(StatsSelector::BatchId)
            .or(self.file_id.map(StatsSelector::FileId))
    }
}

/// `data` of `POST /api/classifications/stats`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassificationStats {
    pub total_resolved: u64,
    pub total_unresolved: u64,
    pub top_categories: Vec<CategoryCount>,
    pub category_distribution: Vec<CategoryShare>,
    pub latest_insight: Option<Insight>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CategoryCount {
    pub category_name: String,
    pub count: u64,
}

/// Distribution entry; older servers send `category`/`count` instead of
/// `category_name`/`percentage`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CategoryShare {
    #[serde(alias = "category")]
    pub category_name: String,
    pub percentage: Option<f64>,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Insight {
    pub overall: Option<OverallInsight>,
    pub by_category: Vec<CategoryInsight>,
}

impl Insight {
    pub fn is_empty(&self) -> bool {
        self.overall.is_none() && self.by_category.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverallInsight {
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    High,
    #[default]
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CategoryInsight {
    pub category_name: String,
    pub priority: InsightPriority,
    pub problem: Option<String>,
    pub short_term_goal: Option<String>,
    pub long_term_goal: Option<String>,
}
