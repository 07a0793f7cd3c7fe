//! Temporal extraction: query text → [`TimeWindow`].
//!
//! Rules are tried in a fixed order and the first one that produces a
//! window wins:
//!
//! 1. a single standalone year (2000-2099) → that calendar year
//! 2. `between|from <A> and|to <B>` → explicit range
//! 3. `on <date>` → one day
//! 4. relative phrases (`last week`, `this week`, `last month`,
//!    `this month`, `yesterday`, `today`) against today's date
//!
//! A rule whose text matches but whose dates fail to parse is skipped like
//! any other miss. Nothing here returns an error.

use std::sync::LazyLock;

use chrono::{Datelike, Days, Local, NaiveDate};
use regex::Regex;

use crate::dates::parse_lenient;
use ea_protocol::TimeWindow;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:between|from)\s+([A-Za-z0-9,\-/ ]+?)\s+(?:and|to)\s+([A-Za-z0-9,\-/ ]+)")
        .unwrap()
});

static ON_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bon\s+([0-9]{1,2}-[A-Za-z]{3}-[0-9]{4}|[A-Za-z]{3,9} [0-9]{1,2}, [0-9]{4}|[0-9]{4}-[0-9]{2}-[0-9]{2})",
    )
    .unwrap()
});

type TemporalRule = fn(&str, NaiveDate) -> Option<TimeWindow>;

/// Extraction rules in priority order.
const RULES: [(&str, TemporalRule); 4] = [
    ("lone_year", lone_year),
    ("explicit_range", explicit_range),
    ("on_date", on_date),
    ("relative_phrase", relative_phrase),
];

/// Extract a date window from `query`, relative to the local date.
pub fn extract(query: &str) -> TimeWindow {
    extract_at(query, Local::now().date_naive())
}

/// Extract a date window from `query`, with relative phrases anchored on `today`.
pub fn extract_at(query: &str, today: NaiveDate) -> TimeWindow {
    let query = query.trim();
    for (name, rule) in RULES {
        if let Some(window) = rule(query, today) {
            tracing::debug!(
                rule = name,
                start = ?window.start(),
                end = ?window.end(),
                "temporal rule matched"
            );
            return window;
        }
    }
    TimeWindow::none()
}

/// Four-digit `20xx` tokens not touching a digit, `/` or `-`.
pub fn standalone_years(query: &str) -> Vec<i32> {
    let bytes = query.as_bytes();
    DIGIT_RUN
        .find_iter(query)
        .filter(|m| m.len() == 4 && m.as_str().starts_with("20"))
        .filter(|m| {
            let before = m.start().checked_sub(1).map(|i| bytes[i]);
            let after = bytes.get(m.end()).copied();
            ![before, after]
                .into_iter()
                .flatten()
                .any(|b| b == b'/' || b == b'-')
        })
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

fn lone_year(query: &str, _today: NaiveDate) -> Option<TimeWindow> {
    let [year] = standalone_years(query)[..] else {
        return None;
    };
    Some(TimeWindow::between(
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

fn explicit_range(query: &str, today: NaiveDate) -> Option<TimeWindow> {
    let caps = RANGE.captures(query)?;
    let start = parse_lenient(&caps[1], today);
    let end = parse_lenient(&caps[2], today);
    match (start, end) {
        (Some(start), Some(end)) => Some(TimeWindow::between(start, end)),
        _ => {
            tracing::debug!(
                start = &caps[1],
                end = &caps[2],
                "range phrase found but endpoints did not parse"
            );
            None
        }
    }
}

fn on_date(query: &str, today: NaiveDate) -> Option<TimeWindow> {
    let caps = ON_DATE.captures(query)?;
    parse_lenient(&caps[1], today).map(TimeWindow::day)
}

fn relative_phrase(query: &str, today: NaiveDate) -> Option<TimeWindow> {
    let lower = query.to_lowercase();
    let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
    let first_of_month = today.with_day(1)?;

    if lower.contains("last week") {
        let start = monday - Days::new(7);
        return Some(TimeWindow::between(start, start + Days::new(6)));
    }
    if lower.contains("this week") {
        return Some(TimeWindow::between(monday, monday + Days::new(6)));
    }
    if lower.contains("last month") {
        let end = first_of_month.pred_opt()?;
        return Some(TimeWindow::between(end.with_day(1)?, end));
    }
    if lower.contains("this month") {
        return Some(TimeWindow::between(first_of_month, today));
    }
    if lower.contains("yesterday") {
        return today.pred_opt().map(TimeWindow::day);
    }
    if lower.contains("today") {
        return Some(TimeWindow::day(today));
    }
    None
}
