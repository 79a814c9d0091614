//! The calendar year holidays are synced for.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};

/// Jan 1 through Dec 31 of a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    year: i32,
}

impl YearWindow {
    pub fn new(year: i32) -> Option<Self> {
        // Both ends must be representable
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
        NaiveDate::from_ymd_opt(year, 1, 1)?;
        Some(YearWindow { year })
    }

    /// The current year in local time.
    pub fn current() -> Self {
        YearWindow {
            year: Local::now().year(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, 12, 31).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day.year() == self.year
    }

    /// Lower bound for event queries: Jan 1 00:00 local time, RFC 3339.
    pub fn time_min_rfc3339(&self) -> String {
        local_midnight(self.first_day()).to_rfc3339()
    }

    /// Upper bound for event queries: Jan 1 00:00 of the following year, so
    /// events on Dec 31 are included.
    pub fn time_max_rfc3339(&self) -> String {
        let next = self.last_day().succ_opt().unwrap_or(NaiveDate::MAX);
        local_midnight(next).to_rfc3339()
    }
}

/// Midnight of `day` in the local timezone, falling back to UTC midnight when
/// local midnight does not exist (DST gaps).
fn local_midnight(day: NaiveDate) -> DateTime<chrono::FixedOffset> {
    let naive = day.and_time(chrono::NaiveTime::MIN);

    match Local.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.fixed_offset(),
        None => naive.and_utc().fixed_offset(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        let window = YearWindow::new(2024).unwrap();

        assert_eq!(window.first_day(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(window.last_day(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert!(window.contains(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
    }

    #[test]
    fn test_query_bounds_cover_the_whole_year() {
        let window = YearWindow::new(2024).unwrap();

        assert!(window.time_min_rfc3339().starts_with("2024-01-01T00:00:00"));
        assert!(window.time_max_rfc3339().starts_with("2025-01-01T00:00:00"));
    }

    #[test]
    fn test_out_of_range_year_is_rejected() {
        assert!(YearWindow::new(i32::MAX).is_none());
    }
}
