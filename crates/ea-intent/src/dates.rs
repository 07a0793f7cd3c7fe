//! Lenient parsing of date-like substrings.
//!
//! Accepts the shapes people type into a query: `July 1, 2025`,
//! `1st Jul 2025`, `08-Jan-2025`, `2025-07-01`, `01/07/2025`. Numeric
//! ambiguity resolves day-first. Missing fields default from `today`.
//! Anything it does not recognize makes the whole parse fail.

use chrono::{Datelike, NaiveDate};

/// Words that may appear between date parts without meaning anything.
const FILLER: &[&str] = &["of", "the", "at", "on", "and"];

const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// A numeric field as typed: its value and digit count.
#[derive(Debug, Clone, Copy)]
struct Number {
    value: u32,
    digits: usize,
}

impl Number {
    fn is_year(&self) -> bool {
        self.digits == 4
    }
}

/// Parse a free-form date substring.
pub fn parse_lenient(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let mut month_name: Option<u32> = None;
    let mut numbers: Vec<Number> = Vec::new();

    for token in text
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '-' | '/' | '.'))
        .filter(|t| !t.is_empty())
    {
        let lower = token.to_lowercase();
        if lower.starts_with(|c: char| c.is_ascii_digit()) {
            numbers.push(parse_number(&lower)?);
        } else if let Some(month) = month_from_name(&lower) {
            if month_name.replace(month).is_some() {
                return None;
            }
        } else if FILLER.contains(&lower.as_str()) || is_weekday(&lower) {
            continue;
        } else {
            return None;
        }
    }

    if numbers.len() > 3 || (numbers.is_empty() && month_name.is_none()) {
        return None;
    }

    match month_name {
        Some(month) => with_month_name(month, &numbers, today),
        None => numeric_only(&numbers, today),
    }
}

/// `8`, `08`, `2025`, `1st`, `22nd`, `3rd`, `08th`.
fn parse_number(token: &str) -> Option<Number> {
    let split = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, suffix) = token.split_at(split);
    if !matches!(suffix, "" | "st" | "nd" | "rd" | "th") {
        return None;
    }
    if suffix.is_empty() && digits.len() > 4 {
        return None;
    }
    Some(Number {
        value: digits.parse().ok()?,
        digits: digits.len(),
    })
}

/// Full month names and their three-letter (or `sept`) abbreviations.
pub fn month_from_name(word: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    if word == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|m| *m == word || (word.len() == 3 && m.starts_with(word)))
        .map(|i| i as u32 + 1)
}

fn is_weekday(word: &str) -> bool {
    WEEKDAYS
        .iter()
        .any(|d| *d == word || (word.len() == 3 && d.starts_with(word)))
}

fn with_month_name(month: u32, numbers: &[Number], today: NaiveDate) -> Option<NaiveDate> {
    let year_pos = numbers.iter().position(Number::is_year);
    let rest: Vec<Number> = numbers
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != year_pos)
        .map(|(_, n)| *n)
        .collect();

    match (year_pos.map(|i| numbers[i]), rest.as_slice()) {
        (Some(year), []) => clamped(year.value as i32, month, today.day()),
        (Some(year), [day]) => NaiveDate::from_ymd_opt(year.value as i32, month, day.value),
        (None, []) => clamped(today.year(), month, today.day()),
        (None, [day]) => NaiveDate::from_ymd_opt(today.year(), month, day.value),
        (None, [day, year]) => {
            NaiveDate::from_ymd_opt(expand_year(*year)?, month, day.value)
        }
        _ => None,
    }
}

fn numeric_only(numbers: &[Number], today: NaiveDate) -> Option<NaiveDate> {
    match numbers {
        [single] if single.is_year() => clamped(single.value as i32, today.month(), today.day()),
        [day] => NaiveDate::from_ymd_opt(today.year(), today.month(), day.value),
        [year, month] if year.is_year() => clamped(year.value as i32, month.value, today.day()),
        [month, year] if year.is_year() => clamped(year.value as i32, month.value, today.day()),
        [a, b] => day_first(a.value, b.value, today.year()),
        [year, month, day] if year.is_year() => {
            NaiveDate::from_ymd_opt(year.value as i32, month.value, day.value)
        }
        [a, b, year] => day_first(a.value, b.value, expand_year(*year)?),
        _ => None,
    }
}

/// Day-first, swapping to month-first only when day-first cannot be a date.
fn day_first(a: u32, b: u32, year: i32) -> Option<NaiveDate> {
    if b > 12 && a <= 12 {
        NaiveDate::from_ymd_opt(year, a, b)
    } else {
        NaiveDate::from_ymd_opt(year, b, a)
    }
}

/// `25` → 2025; four-digit years pass through.
fn expand_year(n: Number) -> Option<i32> {
    match n.digits {
        1 | 2 => Some(2000 + n.value as i32),
        4 => Some(n.value as i32),
        _ => None,
    }
}

/// Build a date, pulling an out-of-range day back to the month's last day.
fn clamped(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day.min(31))
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2025, 3, 31)
    }

    fn parse(text: &str) -> Option<NaiveDate> {
        parse_lenient(text, today())
    }

    #[test]
    fn long_month_day_year() {
        assert_eq!(parse("July 1, 2025"), Some(ymd(2025, 7, 1)));
        assert_eq!(parse("july 10, 2025"), Some(ymd(2025, 7, 10)));
    }

    #[test]
    fn day_abbrev_year() {
        assert_eq!(parse("08-Jan-2025"), Some(ymd(2025, 1, 8)));
        assert_eq!(parse("8 Sept 2024"), Some(ymd(2024, 9, 8)));
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(parse("08th Feb, 2025"), Some(ymd(2025, 2, 8)));
        assert_eq!(parse("the 1st of March 2025"), Some(ymd(2025, 3, 1)));
    }

    #[test]
    fn iso_date() {
        assert_eq!(parse("2025-07-01"), Some(ymd(2025, 7, 1)));
    }

    #[test]
    fn slashes_resolve_day_first() {
        assert_eq!(parse("01/07/2025"), Some(ymd(2025, 7, 1)));
    }

    #[test]
    fn slashes_swap_when_day_first_is_impossible() {
        assert_eq!(parse("07/25/2025"), Some(ymd(2025, 7, 25)));
    }

    #[test]
    fn two_digit_year() {
        assert_eq!(parse("5 Jan 24"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn missing_year_defaults_to_today() {
        assert_eq!(parse("July 4"), Some(ymd(2025, 7, 4)));
    }

    #[test]
    fn month_and_year_keep_today_day_clamped() {
        // today is the 31st; February has no 31st
        assert_eq!(parse("February 2024"), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn weekday_names_ignored() {
        assert_eq!(parse("Monday, July 7, 2025"), Some(ymd(2025, 7, 7)));
    }

    #[test]
    fn unknown_words_fail() {
        assert_eq!(parse("July 10, 2025 in North"), None);
        assert_eq!(parse("last quarter"), None);
    }

    #[test]
    fn impossible_dates_fail() {
        assert_eq!(parse("31 February 2025"), None);
        assert_eq!(parse("13/13/2025"), None);
    }

    #[test]
    fn empty_and_noise_fail() {
        assert_eq!(parse(""), None);
        assert_eq!(parse(" , - "), None);
        assert_eq!(parse("10:30"), None);
        assert_eq!(parse("1 2 3 4"), None);
    }

    #[test]
    fn month_names() {
        assert_eq!(month_from_name("jan"), Some(1));
        assert_eq!(month_from_name("december"), Some(12));
        assert_eq!(month_from_name("ju"), None);
        assert_eq!(month_from_name("janu"), None);
    }
}
