//! Ticket records as received from the classification API and the flattened
//! rows the list controller works on.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{CATEGORY_ORDER, Category, Confidence, MISSING_FIELD};
use crate::utils::date::parse_received_at;
use crate::utils::text::preview;

/// A ticket record as found in a category bucket. Every field is optional
/// and deserialization never fails: values of the wrong shape read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RawTicket {
    pub received_at: Option<String>,
    pub channel: Option<String>,
    pub content: Option<String>,
    pub preview: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub confidence: Option<String>,
}

impl From<Value> for RawTicket {
    fn from(value: Value) -> Self {
        let Value::Object(map) = value else {
            return RawTicket::default();
        };

        let keywords = match map.get("keywords") {
            Some(Value::Array(items)) => Some(items.iter().filter_map(scalar_string).collect()),
            _ => None,
        };

        RawTicket {
            received_at: map.get("received_at").and_then(scalar_string),
            channel: map.get("channel").and_then(scalar_string),
            content: map.get("content").and_then(scalar_string),
            preview: map.get("preview").and_then(scalar_string),
            keywords,
            confidence: map.get("confidence").and_then(scalar_string),
        }
    }
}

/// Non-empty strings and non-zero numbers become strings; everything else,
/// numeric zero included, is absent and falls back to the placeholder.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// One category's ticket list. Anything other than an array reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Vec<RawTicket>")]
pub struct Bucket(pub Vec<RawTicket>);

impl From<Value> for Bucket {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Bucket(items.into_iter().map(RawTicket::from).collect()),
            _ => Bucket::default(),
        }
    }
}

impl From<Bucket> for Vec<RawTicket> {
    fn from(bucket: Bucket) -> Self {
        bucket.0
    }
}

impl From<Vec<RawTicket>> for Bucket {
    fn from(tickets: Vec<RawTicket>) -> Self {
        Bucket(tickets)
    }
}

/// Category label -> bucket, as found under `tickets.all_by_category`.
pub type BucketsByCategory = BTreeMap<String, Bucket>;

/// A normalized, flattened ticket row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub received_at: String,
    pub channel: String,
    pub content: String,
    pub preview: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub confidence: String,
}

impl Ticket {
    /// Normalize a raw record that was found in the bucket for `category`.
    pub fn from_raw(raw: &RawTicket, category: &str) -> Self {
        let content = raw.content.clone().unwrap_or_default();
        Ticket {
            received_at: raw
                .received_at
                .clone()
                .unwrap_or_else(|| MISSING_FIELD.to_string()),
            channel: raw
                .channel
                .clone()
                .unwrap_or_else(|| MISSING_FIELD.to_string()),
            preview: raw.preview.clone().unwrap_or_else(|| preview(&content)),
            content,
            category: category.to_string(),
            keywords: raw.keywords.clone().unwrap_or_default(),
            confidence: raw
                .confidence
                .clone()
                .unwrap_or_else(|| MISSING_FIELD.to_string()),
        }
    }

    pub fn received_timestamp(&self) -> Option<Timestamp> {
        parse_received_at(&self.received_at)
    }

    pub fn confidence_grade(&self) -> Option<Confidence> {
        Confidence::from_label(&self.confidence)
    }
}

/// Flatten buckets into one ticket list.
///
/// Known categories come first in fixed priority order; buckets keyed by
/// any other label follow in key order. Order within a bucket is kept.
pub fn flatten_by_category(buckets: &BucketsByCategory) -> Vec<Ticket> {
    let mut rows = Vec::with_capacity(buckets.values().map(|b| b.0.len()).sum());

    for category in CATEGORY_ORDER {
        if let Some(bucket) = buckets.get(category.label()) {
            rows.extend(bucket.0.iter().map(|raw| Ticket::from_raw(raw, category.label())));
        }
    }

    for (label, bucket) in buckets {
        if Category::from_label(label).is_some() {
            continue;
        }
        tracing::debug!(
            category = %label,
            tickets = bucket.0.len(),
            "appending bucket outside the fixed category order"
        );
        rows.extend(bucket.0.iter().map(|raw| Ticket::from_raw(raw, label)));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn buckets(value: Value) -> BucketsByCategory {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_raw_ticket_lenient_fields() {
        let raw: RawTicket = serde_json::from_value(json!({
            "received_at": "",
            "channel": 42,
            "content": null,
            "keywords": "not-a-list",
            "confidence": ["상"],
        }))
        .unwrap();

        assert_eq!(raw.received_at, None);
        assert_eq!(raw.channel.as_deref(), Some("42"));
        assert_eq!(raw.content, None);
        assert_eq!(raw.keywords, None);
        assert_eq!(raw.confidence, None);
    }

    #[test]
    fn test_raw_ticket_zero_reads_as_absent() {
        let raw: RawTicket = serde_json::from_value(json!({
            "channel": 0,
            "confidence": 0.0,
            "content": 7,
        }))
        .unwrap();
        assert_eq!(raw.channel, None);
        assert_eq!(raw.confidence, None);
        assert_eq!(raw.content.as_deref(), Some("7"));

        let ticket = Ticket::from_raw(&raw, "기타");
        assert_eq!(ticket.channel, "-");
        assert_eq!(ticket.confidence, "-");
    }

    #[test]
    fn test_raw_ticket_from_non_object() {
        let raw: RawTicket = serde_json::from_value(json!("just text")).unwrap();
        assert_eq!(raw, RawTicket::default());
    }

    #[test]
    fn test_bucket_non_array_is_empty() {
        let b = buckets(json!({ "배송": {"oops": true}, "결제": null }));
        assert!(b["배송"].0.is_empty());
        assert!(b["결제"].0.is_empty());
    }

    #[test]
    fn test_ticket_defaults() {
        let ticket = Ticket::from_raw(&RawTicket::default(), "기타");
        assert_eq!(ticket.received_at, "-");
        assert_eq!(ticket.channel, "-");
        assert_eq!(ticket.content, "");
        assert_eq!(ticket.preview, "");
        assert_eq!(ticket.category, "기타");
        assert!(ticket.keywords.is_empty());
        assert_eq!(ticket.confidence, "-");
        assert_eq!(ticket.confidence_grade(), None);
    }

    #[test]
    fn test_ticket_preview_derived_from_content() {
        let raw = RawTicket {
            content: Some("주문한 상품이 아직 도착하지 않았습니다 확인 부탁드립니다".to_string()),
            ..Default::default()
        };
        let ticket = Ticket::from_raw(&raw, "배송");
        assert_eq!(ticket.preview, "주문한 상품이 아직 도착하지...");

        let raw = RawTicket {
            content: Some("긴 본문".to_string()),
            preview: Some("서버 요약".to_string()),
            ..Default::default()
        };
        assert_eq!(Ticket::from_raw(&raw, "배송").preview, "서버 요약");
    }

    #[test]
    fn test_flatten_uses_priority_order() {
        let b = buckets(json!({
            "기타": [{"content": "o1"}],
            "배송": [{"content": "d1"}, {"content": "d2"}],
            "품질/하자": [{"content": "q1"}],
            "결제": [{"content": "p1"}],
        }));

        let rows = flatten_by_category(&b);
        let contents: Vec<_> = rows.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["q1", "d1", "d2", "p1", "o1"]);
        assert_eq!(rows[1].category, "배송");
    }

    #[test]
    fn test_flatten_keeps_unknown_buckets_after_known() {
        let b = buckets(json!({
            "신규": [{"content": "n1"}],
            "서비스": [{"content": "s1"}],
        }));

        let rows = flatten_by_category(&b);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "서비스");
        assert_eq!(rows[1].category, "신규");
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_by_category(&BucketsByCategory::new()).is_empty());
    }
}
