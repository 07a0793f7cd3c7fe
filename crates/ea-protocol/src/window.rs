//! Inclusive date windows and the `DD-Mon-YYYY` date codec.
//!
//! Downstream query layers match dates on the exact `08-Jan-2025` text form,
//! so every date that leaves the resolver goes through [`format_date`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Text format of every date crossing the resolver boundary.
pub const DATE_FORMAT: &str = "%d-%b-%Y";

/// Errors decoding a window or date from its wire form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateFormatError {
    #[error("invalid date '{0}', expected DD-Mon-YYYY")]
    InvalidDate(String),

    #[error("start_date and end_date must both be set or both be null")]
    HalfOpen,
}

/// Format a date as `DD-Mon-YYYY` (e.g. `08-Jan-2025`).
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `DD-Mon-YYYY` date.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateFormatError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| DateFormatError::InvalidDate(text.to_string()))
}

/// Inclusive `[start, end]` date interval, or no temporal filter at all.
///
/// Both bounds are set together or not at all; the type has no way to
/// represent a half-open window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "WindowFields", try_from = "WindowFields")]
pub struct TimeWindow {
    bounds: Option<(NaiveDate, NaiveDate)>,
}

impl TimeWindow {
    /// Window with no temporal filter.
    pub const fn none() -> Self {
        Self { bounds: None }
    }

    /// Window spanning `start..=end`.
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            bounds: Some((start, end)),
        }
    }

    /// Window covering one day.
    pub const fn day(date: NaiveDate) -> Self {
        Self::between(date, date)
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.bounds.map(|(start, _)| start)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.bounds.map(|(_, end)| end)
    }

    /// Start bound in wire format.
    pub fn start_date(&self) -> Option<String> {
        self.start().map(format_date)
    }

    /// End bound in wire format.
    pub fn end_date(&self) -> Option<String> {
        self.end().map(format_date)
    }

    /// Whether `date` falls inside the window. An empty window admits every date.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.bounds {
            Some((start, end)) => start <= date && date <= end,
            None => true,
        }
    }
}

/// Wire shape: `{"start_date": "01-Jul-2025", "end_date": "10-Jul-2025"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowFields {
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

impl From<TimeWindow> for WindowFields {
    fn from(window: TimeWindow) -> Self {
        Self {
            start_date: window.start_date(),
            end_date: window.end_date(),
        }
    }
}

impl TryFrom<WindowFields> for TimeWindow {
    type Error = DateFormatError;

    fn try_from(fields: WindowFields) -> Result<Self, Self::Error> {
        match (fields.start_date, fields.end_date) {
            (Some(start), Some(end)) => Ok(TimeWindow::between(
                parse_date(&start)?,
                parse_date(&end)?,
            )),
            (None, None) => Ok(TimeWindow::none()),
            _ => Err(DateFormatError::HalfOpen),
        }
    }
}
