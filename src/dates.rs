// src/dates.rs
//! Date parsing for sort keys.
//!
//! Every parser returns UTC milliseconds or `None`. `None` is the "invalid" value and
//! sorts after every valid date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::OnceCell;
use regex::Regex;

fn locale_date_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{1,4})[/-](\d{1,2})[/-](\d{1,4})(?:[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2}))?)?$",
        )
        .expect("locale date regex")
    })
}

/// Parse a spreadsheet-formatted date such as `2024/3/1`, `2024-03-01` or `3/1/2024`,
/// optionally followed by ` H:M[:S]`.
///
/// The year comes first unless only the last part has four digits.
pub fn parse_locale_date(input: &str) -> Option<i64> {
    let caps = locale_date_re().captures(input.trim())?;
    let a = caps.get(1)?.as_str();
    let b = caps.get(2)?.as_str();
    let c = caps.get(3)?.as_str();

    let (y, m, d) = if a.len() == 4 {
        (a, b, c)
    } else if c.len() == 4 {
        (c, a, b)
    } else {
        return None;
    };

    let num = |i: usize| -> Option<u32> {
        caps.get(i)
            .map(|g| g.as_str().parse::<u32>().ok())
            .unwrap_or(Some(0))
    };

    let date = NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)?;
    let dt = date.and_hms_opt(num(4)?, num(5)?, num(6)?)?;
    Some(dt.and_utc().timestamp_millis())
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a feed timestamp (RFC 3339, RFC 2822, naive ISO forms, or a locale date).
/// Offsets are honoured; naive values are read as UTC.
pub fn parse_news_timestamp(input: &str) -> Option<i64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    parse_locale_date(s)
}
