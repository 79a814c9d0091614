//! Google Calendar events list.

use anyhow::{Context, Result};
use google_calendar::Client;
use google_calendar::types::OrderBy;
use holiday_core::{CalendarClient, Credential, FetchError, RawEvent, YearWindow};

use crate::convert::{FromGoogle, is_cancelled};

/// Fetches events through the Google Calendar v3 API with a bearer token.
#[derive(Debug, Default, Clone)]
pub struct GoogleCalendar;

impl GoogleCalendar {
    pub fn new() -> Self {
        GoogleCalendar
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        credential: &Credential,
        window: &YearWindow,
    ) -> Result<Vec<RawEvent>> {
        // Only the bearer token is needed to read events
        let client = Client::new(
            String::new(),
            String::new(),
            String::new(),
            credential.bearer().to_string(),
            String::new(),
        );

        let time_min = window.time_min_rfc3339();
        let time_max = window.time_max_rfc3339();

        let response = client
            .events()
            .list_all(
                calendar_id,
                "",
                0,
                OrderBy::StartTime,
                &[],
                "", // search query
                &[],
                false,
                false,
                true, // single_events
                &time_max,
                &time_min,
                "",
                "",
            )
            .await
            .with_context(|| format!("Failed to fetch events from {}", calendar_id))?;

        let events: Vec<RawEvent> = response
            .body
            .into_iter()
            .filter(|e| !is_cancelled(e))
            .map(RawEvent::from_google)
            .collect();

        tracing::debug!(calendar_id, count = events.len(), "fetched events");

        Ok(events)
    }
}

impl CalendarClient for GoogleCalendar {
    async fn fetch_events(
        &self,
        calendar_id: &str,
        credential: &Credential,
        window: &YearWindow,
    ) -> Result<Vec<RawEvent>, FetchError> {
        self.list_events(calendar_id, credential, window)
            .await
            .map_err(|e| FetchError::new(calendar_id, format!("{:#}", e)))
    }
}
