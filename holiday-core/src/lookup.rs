//! Read side of the published holiday set.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;

use crate::holiday::HolidayRecord;
use crate::holiday_set::HolidaySet;

/// A reader handle on the holidays published by the sync orchestrator.
///
/// Each sync swaps in a whole new set, so a snapshot taken here never sees a
/// half-built one.
#[derive(Debug, Clone)]
pub struct HolidayLookup {
    rx: watch::Receiver<Arc<HolidaySet>>,
}

impl HolidayLookup {
    pub(crate) fn new(rx: watch::Receiver<Arc<HolidaySet>>) -> Self {
        HolidayLookup { rx }
    }

    /// The currently published set.
    pub fn snapshot(&self) -> Arc<HolidaySet> {
        Arc::clone(&self.rx.borrow())
    }

    /// The first holiday on `day` in the current set.
    pub fn lookup(&self, day: NaiveDate) -> Option<HolidayRecord> {
        self.rx.borrow().lookup(day).cloned()
    }
}
