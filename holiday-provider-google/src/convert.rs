use chrono::Local;
use holiday_core::{EventStart, RawEvent};

pub trait FromGoogle {
    fn from_google(event: google_calendar::types::Event) -> Self;
}

impl FromGoogle for RawEvent {
    fn from_google(event: google_calendar::types::Event) -> Self {
        // All-day date first, then the timestamp in local time
        let start = event.start.and_then(|start| match (start.date, start.date_time) {
            (Some(d), _) => Some(EventStart::Date(d)),
            (None, Some(dt)) => Some(EventStart::DateTime(
                dt.with_timezone(&Local).fixed_offset(),
            )),
            (None, None) => None,
        });

        RawEvent {
            start,
            summary: if event.summary.is_empty() {
                None
            } else {
                Some(event.summary)
            },
        }
    }
}

pub fn is_cancelled(event: &google_calendar::types::Event) -> bool {
    event.status == "cancelled"
}
