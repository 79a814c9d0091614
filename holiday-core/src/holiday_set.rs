//! Merging two calendars into one ordered set of holidays.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{HolidayError, HolidayResult};
use crate::event::RawEvent;
use crate::holiday::{Classification, HolidayRecord};
use crate::window::YearWindow;

/// Holidays from one sync, in source order.
///
/// Records from the public calendar come first, followed by records from the
/// work calendar. Days present in both calendars appear twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HolidaySet {
    records: Vec<HolidayRecord>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from the public and work calendars' events.
    ///
    /// Events whose day falls outside `window` are dropped. An event without
    /// any start fails the whole aggregation.
    pub fn aggregate(
        window: &YearWindow,
        public: &[RawEvent],
        work: &[RawEvent],
    ) -> HolidayResult<Self> {
        let mut records = Vec::with_capacity(public.len() + work.len());

        for (classification, events) in [
            (Classification::Public, public),
            (Classification::Work, work),
        ] {
            for (index, event) in events.iter().enumerate() {
                let start = event.start.as_ref().ok_or(HolidayError::MalformedEvent {
                    classification,
                    index,
                })?;

                let day = start.day();
                if !window.contains(day) {
                    tracing::debug!(
                        %classification,
                        %day,
                        title = event.title(),
                        "dropping holiday outside {}",
                        window.year()
                    );
                    continue;
                }

                records.push(HolidayRecord::new(day, classification, event.title()));
            }
        }

        Ok(HolidaySet { records })
    }

    /// The first holiday on `day`, if any.
    pub fn lookup(&self, day: NaiveDate) -> Option<&HolidayRecord> {
        self.records.iter().find(|r| r.is_on(day))
    }

    /// Holidays falling in the given month, in set order.
    pub fn in_month(&self, year: i32, month: u32) -> impl Iterator<Item = &HolidayRecord> {
        self.records
            .iter()
            .filter(move |r| r.date().year() == year && r.date().month() == month)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HolidayRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, classification: Classification) -> usize {
        self.records
            .iter()
            .filter(|r| r.classification() == classification)
            .count()
    }
}

impl<'a> IntoIterator for &'a HolidaySet {
    type Item = &'a HolidayRecord;
    type IntoIter = std::slice::Iter<'a, HolidayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
