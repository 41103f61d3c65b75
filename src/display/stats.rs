//! Dashboard statistics: KPI counts, top categories, distribution and
//! per-category insights.

use crate::payload::{CategoryInsight, CategoryShare, ClassificationStats, InsightPriority};
use crate::utils::text::format_count;

pub const NO_STATS_MESSAGE: &str = "데이터가 없습니다.";

/// Number of top categories and insights shown.
pub const TOP_N: usize = 3;

pub fn priority_marker(priority: InsightPriority) -> &'static str {
    match priority {
        InsightPriority::High => "🔴",
        InsightPriority::Medium => "🟡",
        InsightPriority::Low | InsightPriority::Unknown => "🟢",
    }
}

pub fn kpi_lines(stats: &ClassificationStats) -> Vec<String> {
    vec![
        format!("해결 {}건", format_count(stats.total_resolved)),
        format!("미해결 {}건", format_count(stats.total_unresolved)),
    ]
}

/// `1위 배송 12건` for the first [`TOP_N`] categories.
pub fn top_category_lines(stats: &ClassificationStats) -> Vec<String> {
    stats
        .top_categories
        .iter()
        .take(TOP_N)
        .enumerate()
        .map(|(i, c)| {
            format!(
                "{}위 {} {}건",
                i + 1,
                c.category_name,
                format_count(c.count)
            )
        })
        .collect()
}

fn distribution_line(share: &CategoryShare) -> String {
    match (share.percentage, share.count) {
        (Some(percentage), _) => format!("{} {:.1}%", share.category_name, percentage),
        (None, Some(count)) => format!("{} {}건", share.category_name, format_count(count)),
        (None, None) => share.category_name.clone(),
    }
}

pub fn distribution_lines(stats: &ClassificationStats) -> Vec<String> {
    stats
        .category_distribution
        .iter()
        .map(distribution_line)
        .collect()
}

pub fn insight_lines(insight: &CategoryInsight) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        priority_marker(insight.priority),
        insight.category_name
    )];
    let sections = [
        ("현황 및 문제점:", &insight.problem),
        ("단기 목표:", &insight.short_term_goal),
        ("장기 목표:", &insight.long_term_goal),
    ];
    for (label, text) in sections {
        if let Some(text) = text.as_deref().filter(|t| !t.is_empty()) {
            lines.push(format!("  {label} {text}"));
        }
    }
    lines
}

/// Text rendering of the stats panel, or [`NO_STATS_MESSAGE`] when there is
/// nothing to show.
pub fn render_stats(stats: Option<&ClassificationStats>) -> String {
    let Some(stats) = stats else {
        return NO_STATS_MESSAGE.to_string();
    };

    let mut out: Vec<String> = kpi_lines(stats);

    let top = top_category_lines(stats);
    if !top.is_empty() {
        out.push(String::new());
        out.push("상위 카테고리".to_string());
        out.extend(top);
    }

    let distribution = distribution_lines(stats);
    if !distribution.is_empty() {
        out.push(String::new());
        out.push("카테고리 분포".to_string());
        out.extend(distribution);
    }

    if let Some(insight) = stats.latest_insight.as_ref().filter(|i| !i.is_empty()) {
        out.push(String::new());
        out.push("인사이트".to_string());
        if let Some(summary) = insight
            .overall
            .as_ref()
            .and_then(|o| o.summary.as_deref())
            .filter(|s| !s.is_empty())
        {
            out.push(summary.to_string());
        }
        for category in insight.by_category.iter().take(TOP_N) {
            out.extend(insight_lines(category));
        }
    }

    out.join("\n")
}
