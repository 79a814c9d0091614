//! Holiday records produced by a calendar sync.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which calendar a holiday came from.
///
/// The tag is positional: the first synced calendar yields `Public` holidays
/// and the second yields `Work` holidays, whatever the event says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Public,
    Work,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Public => "Public",
            Classification::Work => "Work",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single holiday on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    date: NaiveDate,
    classification: Classification,
    title: String,
}

impl HolidayRecord {
    pub fn new(date: NaiveDate, classification: Classification, title: impl Into<String>) -> Self {
        HolidayRecord {
            date,
            classification,
            title: title.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date == day
    }
}

impl fmt::Display for HolidayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "(No title)")
        } else {
            write!(f, "{}", self.title)
        }
    }
}
