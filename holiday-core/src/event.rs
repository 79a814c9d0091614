//! Provider-neutral raw calendar events.
//!
//! Calendar providers convert their API responses into `RawEvent`s. The
//! aggregator only cares about when an event starts and what it is called.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// The start of an event: either an all-day date or a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStart {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl EventStart {
    /// The calendar day this start falls on.
    ///
    /// Timestamps keep the offset they were written with, so the day is the
    /// wall-clock date in that offset rather than the UTC date.
    pub fn day(&self) -> NaiveDate {
        match self {
            EventStart::Date(d) => *d,
            EventStart::DateTime(dt) => dt.date_naive(),
        }
    }
}

impl FromStr for EventStart {
    type Err = String;

    /// Parse `YYYY-MM-DD` as an all-day date, anything else as RFC 3339.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(EventStart::Date(date));
        }

        DateTime::parse_from_rfc3339(s)
            .map(EventStart::DateTime)
            .map_err(|_| {
                format!(
                    "Invalid event start '{}'. Expected YYYY-MM-DD or an RFC 3339 timestamp",
                    s
                )
            })
    }
}

/// An event as returned by a calendar source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawEvent {
    /// `None` when the provider supplied neither a date nor a timestamp.
    pub start: Option<EventStart>,
    pub summary: Option<String>,
}

impl RawEvent {
    pub fn new(start: EventStart, summary: impl Into<String>) -> Self {
        RawEvent {
            start: Some(start),
            summary: Some(summary.into()),
        }
    }

    /// An all-day event on `date`.
    pub fn all_day(date: NaiveDate, summary: impl Into<String>) -> Self {
        Self::new(EventStart::Date(date), summary)
    }

    pub fn title(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }
}
