//! Value conversion helpers shared by the resolver
//!
//! All helpers here are lenient: they return `None` instead of an error, so a
//! single bad attribute never aborts the extraction of an item.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static ORDINAL_SUFFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").expect("Invalid ordinal regex"));

static YEAR_MONTH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("Invalid year-month regex"));

static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("Invalid year regex"));

/// Date-times carrying an explicit offset
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Local date-times, interpreted as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%B %d, %Y", // January 15, 2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y", // 15 January 2024
    "%d %b %Y",
    "%d %B, %Y",
];

/// Split a token list attribute (`itemtype`, `itemprop`) on whitespace
///
/// Runs of whitespace separate tokens; empty tokens never appear.
pub fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split_whitespace()
}

/// Trim text and collapse internal whitespace runs to single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a URL reference against an optional base
///
/// Absolute references resolve without a base. Returns `None` for malformed
/// references and for relative references with no base to resolve against.
pub fn resolve_url(base: Option<&Url>, reference: &str) -> Option<String> {
    let reference = reference.trim();

    let resolved = match base {
        Some(base) => base.join(reference),
        None => Url::parse(reference),
    };

    resolved.ok().map(|url| url.to_string())
}

/// Best-effort date/time parsing
///
/// Accepts RFC 3339 and RFC 2822 timestamps, ISO-like date-times with or
/// without seconds and offset, plain dates, year-month and year strings, and
/// common English formats such as `January 2nd, 2020`. Values without an
/// offset are taken as UTC; values without a time as midnight.
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let cleaned = collapse_whitespace(input);
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&cleaned) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(&cleaned) {
        return Some(dt.with_timezone(&Utc));
    }

    // chrono's offset specifiers don't read a bare `Z`
    let with_offset = match cleaned.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{}+00:00", rest),
        None => cleaned.clone(),
    };
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return Some(dt.and_utc());
        }
    }

    if YEAR_MONTH_REGEX.is_match(&cleaned) {
        return midnight(NaiveDate::parse_from_str(&format!("{}-01", cleaned), "%Y-%m-%d").ok()?);
    }

    if YEAR_REGEX.is_match(&cleaned) {
        return midnight(NaiveDate::from_ymd_opt(cleaned.parse().ok()?, 1, 1)?);
    }

    let without_ordinals = ORDINAL_SUFFIX_REGEX.replace_all(&cleaned, "$1");
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&without_ordinals, fmt) {
            return midnight(date);
        }
    }

    None
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}
