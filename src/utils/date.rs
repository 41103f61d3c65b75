//! Lenient timestamp parsing for `received_at` values.
//!
//! The classification API does not pin a timestamp format, so parsing tries
//! the shapes seen in practice. Values without an offset are read as KST.

use jiff::civil::{Date, DateTime};
use jiff::fmt::rfc2822;
use jiff::tz::{self, TimeZone};
use jiff::Timestamp;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

const NAIVE_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y.%m.%d"];

/// Korea Standard Time (UTC+9, no daylight saving).
pub fn kst() -> TimeZone {
    TimeZone::fixed(tz::offset(9))
}

/// Parse a `received_at` string. Returns `None` when no known shape fits.
pub fn parse_received_at(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(ts) = s.parse::<Timestamp>() {
        return Some(ts);
    }
    // HTTP-date / RFC 2822, e.g. "Sun, 30 Mar 2025 10:00:00 GMT".
    if let Ok(zoned) = rfc2822::parse(s) {
        return Some(zoned.timestamp());
    }

    let naive = s
        .parse::<DateTime>()
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| DateTime::strptime(fmt, s).ok())
        })
        .or_else(|| parse_date(s).map(|d| d.to_datetime(jiff::civil::Time::midnight())))?;

    naive.to_zoned(kst()).ok().map(|z| z.timestamp())
}

fn parse_date(s: &str) -> Option<Date> {
    s.parse::<Date>()
        .ok()
        .or_else(|| DATE_FORMATS.iter().find_map(|fmt| Date::strptime(fmt, s).ok()))
}

/// Whole days elapsed from `then` to `now`, floored. Future timestamps give
/// negative values.
pub fn days_between(now: Timestamp, then: Timestamp) -> i64 {
    (now.as_millisecond() - then.as_millisecond()).div_euclid(MILLIS_PER_DAY)
}

/// Format a timestamp as `YYYY-MM-DD HH:MM` in KST.
pub fn format_kst_minutes(ts: Timestamp) -> String {
    ts.to_zoned(kst()).strftime("%Y-%m-%d %H:%M").to_string()
}
