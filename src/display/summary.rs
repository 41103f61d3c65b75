//! Summary cards of a classification run: the category table, per-channel
//! donut cards and the reliability box.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::payload::{AccuracyThresholds, CategoryInfo, ChannelInfo, ReliabilityInfo};
use crate::types::{CATEGORY_ORDER, Category};
use crate::utils::text::{format_count, format_share, join_keywords};

/// Shown in the category card before the first run.
pub const CATEGORY_PLACEHOLDER: &str = "[분류 실행]을 눌러 데이터를 불러오세요";

/// Segments below this share get no percentage label.
pub const LABEL_MIN_PERCENT: f64 = 1.0;

/// Tooltip colour for categories outside the fixed list.
const UNKNOWN_CATEGORY_COLOR: &str = "#666";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct CategoryRow {
    #[tabled(rename = "카테고리")]
    pub category: String,
    #[tabled(rename = "건수")]
    pub count: String,
    #[tabled(rename = "비율")]
    pub ratio: String,
    #[tabled(rename = "키워드")]
    pub keywords: String,
}

impl From<&CategoryInfo> for CategoryRow {
    fn from(info: &CategoryInfo) -> Self {
        Self {
            category: info.category.clone(),
            count: format_count(info.count),
            ratio: format!("{:.1}%", info.ratio * 100.0),
            keywords: join_keywords(&info.keywords),
        }
    }
}

pub fn category_rows(infos: &[CategoryInfo]) -> Vec<CategoryRow> {
    infos.iter().map(CategoryRow::from).collect()
}

pub fn render_category_table(infos: &[CategoryInfo]) -> String {
    if infos.is_empty() {
        return CATEGORY_PLACEHOLDER.to_string();
    }
    let mut table = Table::new(category_rows(infos));
    table.with(Style::rounded());
    table.to_string()
}

/// One arc of a channel donut, in degrees clockwise from the top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSegment {
    pub category: Category,
    pub color: &'static str,
    pub start_deg: f64,
    pub end_deg: f64,
}

/// Percentage label placed at the middle of a segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutLabel {
    pub category: Category,
    pub mid_deg: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipEntry {
    pub category: String,
    pub color: &'static str,
    pub count: u64,
    pub percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelCard {
    pub channel: String,
    pub count: u64,
    /// Share of all channels, e.g. `42.5`.
    pub share: String,
    pub segments: Vec<DonutSegment>,
    pub labels: Vec<DonutLabel>,
    pub tooltip: Vec<TooltipEntry>,
}

impl ChannelCard {
    /// Sub-heading, e.g. `1,234건 · 42.5%`.
    pub fn subtitle(&self) -> String {
        format!("{}건 · {}%", format_count(self.count), self.share)
    }
}

fn category_count(info: &ChannelInfo, category: Category) -> u64 {
    info.by_category.get(category.label()).copied().unwrap_or(0)
}

/// Donut arcs in fixed category order. Empty categories take no space.
pub fn donut_segments(info: &ChannelInfo) -> Vec<DonutSegment> {
    let mut start = 0.0;
    let mut segments = Vec::new();
    for category in CATEGORY_ORDER {
        let value = category_count(info, category);
        let deg = if info.count > 0 {
            value as f64 / info.count as f64 * 360.0
        } else {
            0.0
        };
        if deg > 0.0 {
            segments.push(DonutSegment {
                category,
                color: category.color(),
                start_deg: start,
                end_deg: start + deg,
            });
        }
        start += deg;
    }
    segments
}

/// Percentage labels for segments of at least [`LABEL_MIN_PERCENT`].
pub fn donut_labels(info: &ChannelInfo) -> Vec<DonutLabel> {
    if info.count == 0 {
        return Vec::new();
    }
    let total = info.count as f64;
    let mut start = 0.0;
    let mut labels = Vec::new();
    for category in CATEGORY_ORDER {
        let value = category_count(info, category);
        if value == 0 {
            continue;
        }
        let ratio = value as f64 / total;
        let deg = ratio * 360.0;
        if ratio * 100.0 >= LABEL_MIN_PERCENT {
            labels.push(DonutLabel {
                category,
                mid_deg: start + deg / 2.0,
                text: format!("{:.1}%", ratio * 100.0),
            });
        }
        start += deg;
    }
    labels
}

/// Non-empty categories of a channel, largest first.
pub fn donut_tooltip(info: &ChannelInfo) -> Vec<TooltipEntry> {
    let mut entries: Vec<TooltipEntry> = info
        .by_category
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(category, count)| TooltipEntry {
            category: category.clone(),
            color: Category::from_label(category)
                .map(Category::color)
                .unwrap_or(UNKNOWN_CATEGORY_COLOR),
            count: *count,
            percent: format_share(*count, info.count),
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Cards for every channel. Shares are taken against the sum of all
/// channels; an all-zero sum counts as one.
pub fn channel_cards(infos: &[ChannelInfo]) -> Vec<ChannelCard> {
    let grand_total = infos.iter().map(|i| i.count).sum::<u64>().max(1);
    infos
        .iter()
        .map(|info| ChannelCard {
            channel: info.channel.clone(),
            count: info.count,
            share: format_share(info.count, grand_total),
            segments: donut_segments(info),
            labels: donut_labels(info),
            tooltip: donut_tooltip(info),
        })
        .collect()
}

pub fn render_channel_cards(cards: &[ChannelCard]) -> String {
    let mut out = String::new();
    for card in cards {
        out.push_str(&format!("{}  {}\n", card.channel, card.subtitle()));
        for entry in &card.tooltip {
            out.push_str(&format!(
                "  {} {}건 ({}%)\n",
                entry.category,
                format_count(entry.count),
                entry.percent
            ));
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityState {
    Good,
    Warn,
    Bad,
}

impl ReliabilityState {
    pub fn classify(average_confidence: f64, thresholds: &AccuracyThresholds) -> Self {
        if average_confidence >= thresholds.good {
            ReliabilityState::Good
        } else if average_confidence >= thresholds.warn {
            ReliabilityState::Warn
        } else {
            ReliabilityState::Bad
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            ReliabilityState::Good => "신뢰도 높음",
            ReliabilityState::Warn => "보통",
            ReliabilityState::Bad => "재검토 필요",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReliabilityView {
    pub state: ReliabilityState,
    pub badge: &'static str,
    pub average_percent: String,
    pub high_count: u64,
    pub high_percent: String,
    pub needs_review: u64,
    pub low_percent: String,
}

impl ReliabilityView {
    pub fn build(info: &ReliabilityInfo, thresholds: &AccuracyThresholds) -> Self {
        let state = ReliabilityState::classify(info.average_confidence, thresholds);
        Self {
            state,
            badge: state.badge(),
            average_percent: format!("{:.1}", info.average_confidence * 100.0),
            high_count: info.high_confidence_count,
            high_percent: format_share(info.high_confidence_count, info.total_tickets),
            needs_review: info.needs_review_count,
            low_percent: format_share(info.low_confidence_count, info.total_tickets),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "[{}] 평균 신뢰도 {}%\n높은 신뢰도 {} ({}%) · 재검토 필요 {} ({}%)",
            self.badge,
            self.average_percent,
            self.high_count,
            self.high_percent,
            self.needs_review,
            self.low_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn channel(name: &str, count: u64, by_category: &[(&str, u64)]) -> ChannelInfo {
        ChannelInfo {
            channel: name.to_string(),
            count,
            by_category: by_category
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_category_rows() {
        let rows = category_rows(&[CategoryInfo {
            category: "배송".to_string(),
            count: 1234,
            ratio: 0.4567,
            keywords: vec!["지연".to_string(), "택배".to_string()],
        }]);
        assert_eq!(rows[0].count, "1,234");
        assert_eq!(rows[0].ratio, "45.7%");
        assert_eq!(rows[0].keywords, "지연, 택배");
    }

    #[test]
    fn test_empty_category_table_shows_placeholder() {
        assert_eq!(render_category_table(&[]), CATEGORY_PLACEHOLDER);
        assert!(render_category_table(&[CategoryInfo::default()]).contains("카테고리"));
    }

    #[test]
    fn test_donut_segments_follow_fixed_order() {
        let info = channel("전화", 4, &[("결제", 1), ("품질/하자", 1), ("배송", 2)]);
        let segments = donut_segments(&info);

        let order: Vec<_> = segments.iter().map(|s| s.category).collect();
        assert_eq!(
            order,
            vec![Category::QualityDefect, Category::Delivery, Category::Payment]
        );
        assert_eq!(segments[0].start_deg, 0.0);
        assert_eq!(segments[0].end_deg, 90.0);
        assert_eq!(segments[1].end_deg, 270.0);
        assert_eq!(segments[2].end_deg, 360.0);
    }

    #[test]
    fn test_donut_skips_labels_below_one_percent() {
        let info = channel("전화", 1000, &[("배송", 995), ("결제", 5)]);
        let labels = donut_labels(&info);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].category, Category::Delivery);
        assert_eq!(donut_segments(&info).len(), 2);
    }

    #[test]
    fn test_empty_channel_has_no_donut() {
        let info = channel("채팅", 0, &[]);
        assert!(donut_segments(&info).is_empty());
        assert!(donut_labels(&info).is_empty());
        assert!(donut_tooltip(&info).is_empty());
    }

    #[test]
    fn test_tooltip_sorted_by_count() {
        let info = channel("전화", 6, &[("결제", 1), ("배송", 3), ("미분류", 2), ("기타", 0)]);
        let tooltip = donut_tooltip(&info);
        let names: Vec<_> = tooltip.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(names, vec!["배송", "미분류", "결제"]);
        assert_eq!(tooltip[0].percent, "50.0");
        assert_eq!(tooltip[1].color, UNKNOWN_CATEGORY_COLOR);
    }

    #[test]
    fn test_channel_cards_share_of_grand_total() {
        let cards = channel_cards(&[channel("전화", 3, &[]), channel("이메일", 1, &[])]);
        assert_eq!(cards[0].share, "75.0");
        assert_eq!(cards[1].subtitle(), "1건 · 25.0%");

        let cards = channel_cards(&[channel("전화", 0, &[])]);
        assert_eq!(cards[0].share, "0.0");
    }

    #[test]
    fn test_reliability_states() {
        let th = AccuracyThresholds::default();
        assert_eq!(ReliabilityState::classify(0.95, &th), ReliabilityState::Good);
        assert_eq!(ReliabilityState::classify(0.90, &th), ReliabilityState::Good);
        assert_eq!(ReliabilityState::classify(0.80, &th), ReliabilityState::Warn);
        assert_eq!(ReliabilityState::classify(0.50, &th), ReliabilityState::Bad);
    }

    #[test]
    fn test_reliability_view() {
        let view = ReliabilityView::build(
            &ReliabilityInfo {
                total_tickets: 200,
                average_confidence: 0.8123,
                high_confidence_count: 150,
                low_confidence_count: 20,
                needs_review_count: 20,
            },
            &AccuracyThresholds::default(),
        );
        assert_eq!(view.badge, "보통");
        assert_eq!(view.average_percent, "81.2");
        assert_eq!(view.high_percent, "75.0");
        assert_eq!(view.low_percent, "10.0");
        assert!(view.render().starts_with("[보통] 평균 신뢰도 81.2%"));
    }
}
