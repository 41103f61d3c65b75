use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enum_display_fromstr;
use crate::error::AutoclassError;

/// Number of ticket rows shown per page.
pub const PAGE_SIZE: usize = 10;

/// Number of code points kept by content previews before the ellipsis.
pub const PREVIEW_CHARS: usize = 15;

/// Placeholder shown for absent scalar ticket fields.
pub const MISSING_FIELD: &str = "-";

/// Ticket category, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    QualityDefect,
    Service,
    Delivery,
    Repair,
    Payment,
    Event,
    General,
    Other,
}

/// Fixed display order for categories, independent of payload key order.
pub const CATEGORY_ORDER: [Category; 8] = [
    Category::QualityDefect,
    Category::Service,
    Category::Delivery,
    Category::Repair,
    Category::Payment,
    Category::Event,
    Category::General,
    Category::Other,
];

impl Category {
    /// The label used by the classification API.
    pub fn label(self) -> &'static str {
        match self {
            Category::QualityDefect => "품질/하자",
            Category::Service => "서비스",
            Category::Delivery => "배송",
            Category::Repair => "AS/수리",
            Category::Payment => "결제",
            Category::Event => "이벤트",
            Category::General => "일반",
            Category::Other => "기타",
        }
    }

    /// Look up a category by its API label. Matching is exact.
    pub fn from_label(label: &str) -> Option<Self> {
        CATEGORY_ORDER.into_iter().find(|c| c.label() == label)
    }

    /// Chart colour for this category.
    pub fn color(self) -> &'static str {
        match self {
            Category::QualityDefect => "#FF6384",
            Category::Service => "#36A2EB",
            Category::Delivery => "#FFCE56",
            Category::Repair => "#4BC0C0",
            Category::Payment => "#9966FF",
            Category::Event => "#FF9F40",
            Category::General => "#C9CBCF",
            Category::Other => "#E7E9ED",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Classifier confidence grade attached to a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "상",
            Confidence::Medium => "중",
            Confidence::Low => "하",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "상" => Some(Confidence::High),
            "중" => Some(Confidence::Medium),
            "하" => Some(Confidence::Low),
            _ => None,
        }
    }

    /// Sort rank: high=3, medium=2, low=1.
    pub fn rank(self) -> u8 {
        match self {
            Confidence::High => 3,
            Confidence::Medium => 2,
            Confidence::Low => 1,
        }
    }
}

/// Rank of a raw confidence label; unknown labels rank 0.
pub fn confidence_rank(label: &str) -> u8 {
    Confidence::from_label(label).map(Confidence::rank).unwrap_or(0)
}

/// Classification engine requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Rule,
    Ai,
}

enum_display_fromstr!(Engine, AutoclassError::invalid_engine, {
    Rule => "rule",
    Ai => "ai",
});

impl Engine {
    /// Human-readable engine name, used when the API reports none.
    pub fn display_name(self) -> &'static str {
        match self {
            Engine::Rule => "규칙 기반",
            Engine::Ai => "AI 기반",
        }
    }
}
