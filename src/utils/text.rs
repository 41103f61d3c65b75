//! Text truncation and number formatting utilities
//!
//! Lengths are measured in Unicode code points so Hangul and emoji count as
//! one character each.

use unicase::UniCase;

use crate::types::PREVIEW_CHARS;

/// Keep the first `max_chars` code points of `s`, appending "..." when
/// anything was cut off.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}

/// Truncate ticket content to the preview length.
pub fn preview(s: &str) -> String {
    truncate_chars(s, PREVIEW_CHARS)
}

/// Unicode case folding, so "Straße" and "STRASSE" fold to the same text.
pub fn fold_case(s: &str) -> String {
    UniCase::new(s).to_folded_case()
}

/// Case-insensitive substring match against a needle already passed
/// through [`fold_case`].
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    folded_needle.is_empty() || fold_case(haystack).contains(folded_needle)
}

/// Join keywords for table display.
pub fn join_keywords<S: AsRef<str>>(keywords: &[S]) -> String {
    keywords
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a count with comma thousands separators, e.g. `12,345`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Share of `part` in `total` as a percentage with one decimal. A zero
/// total yields `0.0`.
pub fn format_share(part: u64, total: u64) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", part as f64 / total as f64 * 100.0)
}
