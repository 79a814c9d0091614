//! Authentication and calendar sync state machine.
//!
//! ```text
//! Unauthenticated -> Authenticating -> AuthenticatedIdle -> Syncing -> Synced
//!                                                                  \-> SyncFailed
//! ```

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::holiday_set::HolidaySet;
use crate::lookup::HolidayLookup;
use crate::provider::{CalendarClient, Credential, IdentityProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    Unauthenticated,
    Authenticating,
    AuthenticatedIdle,
    Syncing,
    Synced,
    /// The last sync failed; the previous holidays are still published.
    SyncFailed(String),
}

impl SyncState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SyncState::Authenticating | SyncState::Syncing)
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncState::Unauthenticated => write!(f, "unauthenticated"),
            SyncState::Authenticating => write!(f, "authenticating"),
            SyncState::AuthenticatedIdle => write!(f, "authenticated"),
            SyncState::Syncing => write!(f, "syncing"),
            SyncState::Synced => write!(f, "synced"),
            SyncState::SyncFailed(reason) => write!(f, "sync failed: {}", reason),
        }
    }
}

/// Owns the credential and the published holidays for one application run.
pub struct HolidayPicker<I, C> {
    identity: I,
    calendar: C,
    config: SyncConfig,
    credential: Option<Credential>,
    state: watch::Sender<SyncState>,
    holidays: watch::Sender<Arc<HolidaySet>>,
}

impl<I, C> HolidayPicker<I, C>
where
    I: IdentityProvider,
    C: CalendarClient,
{
    pub fn new(identity: I, calendar: C, config: SyncConfig) -> Self {
        let (state, _) = watch::channel(SyncState::Unauthenticated);
        let (holidays, _) = watch::channel(Arc::new(HolidaySet::new()));

        HolidayPicker {
            identity,
            calendar,
            config,
            credential: None,
            state,
            holidays,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state.borrow().clone()
    }

    /// Follow state transitions, e.g. to drive a loading indicator.
    pub fn subscribe_state(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// A reader handle for the presentation layer.
    pub fn lookup(&self) -> HolidayLookup {
        HolidayLookup::new(self.holidays.subscribe())
    }

    pub fn holidays(&self) -> Arc<HolidaySet> {
        Arc::clone(&self.holidays.borrow())
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Authenticate, then sync straight away.
    pub async fn run(&mut self) -> Result<(), SyncError> {
        self.authenticate().await?;
        self.sync().await
    }

    /// Request a credential from the identity provider.
    ///
    /// On failure the state stays `Authenticating`; there is no retry.
    pub async fn authenticate(&mut self) -> Result<(), SyncError> {
        self.set_state(SyncState::Authenticating);
        tracing::info!(client_id = %self.config.client_id, "requesting access credential");

        let credential = self
            .identity
            .request_credential(&self.config.client_id, &self.config.scope)
            .await
            .inspect_err(|e| tracing::warn!("authentication failed: {}", e))?;

        self.credential = Some(credential);
        self.set_state(SyncState::AuthenticatedIdle);

        Ok(())
    }

    /// Fetch both calendars concurrently and publish the merged holidays.
    ///
    /// Either fetch failing leaves the published set untouched and moves to
    /// `SyncFailed`.
    pub async fn sync(&mut self) -> Result<(), SyncError> {
        let Some(credential) = self.credential.as_ref() else {
            return Err(SyncError::NotAuthenticated);
        };

        self.set_state(SyncState::Syncing);

        let window = self.config.window;
        let (public, work) = tokio::join!(
            self.calendar
                .fetch_events(&self.config.public_calendar_id, credential, &window),
            self.calendar
                .fetch_events(&self.config.work_calendar_id, credential, &window),
        );

        let result = match (public, work) {
            (Ok(public), Ok(work)) => {
                tracing::debug!(
                    public = public.len(),
                    work = work.len(),
                    "fetched calendar events"
                );
                HolidaySet::aggregate(&window, &public, &work).map_err(SyncError::from)
            }
            (Err(e), _) | (_, Err(e)) => Err(SyncError::from(e)),
        };

        match result {
            Ok(set) => {
                tracing::info!(holidays = set.len(), year = window.year(), "holidays synced");
                self.holidays.send_replace(Arc::new(set));
                self.set_state(SyncState::Synced);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to load holidays: {}", e);
                self.set_state(SyncState::SyncFailed(e.to_string()));
                Err(e)
            }
        }
    }

    fn set_state(&self, state: SyncState) {
        tracing::debug!(%state, "sync state");
        self.state.send_replace(state);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::error::{AuthError, FetchError};
    use crate::event::RawEvent;
    use crate::holiday::Classification;
    use crate::window::YearWindow;

    const PUBLIC: &str = "public@holiday";
    const WORK: &str = "work@example.com";

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> SyncConfig {
        SyncConfig {
            client_id: "client".to_string(),
            scope: "scope".to_string(),
            public_calendar_id: PUBLIC.to_string(),
            work_calendar_id: WORK.to_string(),
            window: YearWindow::new(2024).unwrap(),
        }
    }

    struct FakeIdentity {
        deny: bool,
    }

    impl IdentityProvider for FakeIdentity {
        async fn request_credential(
            &self,
            client_id: &str,
            _scope: &str,
        ) -> Result<Credential, AuthError> {
            if self.deny {
                Err(AuthError::Denied("user closed the consent screen".to_string()))
            } else {
                Ok(Credential::new(format!("token-for-{client_id}")))
            }
        }
    }

    /// Serves canned events per calendar; calendars without an entry fail.
    #[derive(Default)]
    struct FakeCalendar {
        events: RefCell<HashMap<String, Vec<RawEvent>>>,
        calls: Cell<usize>,
    }

    impl FakeCalendar {
        fn with(self, calendar_id: &str, events: Vec<RawEvent>) -> Self {
            self.events
                .borrow_mut()
                .insert(calendar_id.to_string(), events);
            self
        }

        fn remove(&self, calendar_id: &str) {
            self.events.borrow_mut().remove(calendar_id);
        }
    }

    impl CalendarClient for FakeCalendar {
        async fn fetch_events(
            &self,
            calendar_id: &str,
            credential: &Credential,
            _window: &YearWindow,
        ) -> Result<Vec<RawEvent>, FetchError> {
            assert_eq!(credential.bearer(), "token-for-client");
            self.calls.set(self.calls.get() + 1);
            tokio::task::yield_now().await;

            self.events
                .borrow()
                .get(calendar_id)
                .cloned()
                .ok_or_else(|| FetchError::new(calendar_id, "404 Not Found"))
        }
    }

    #[tokio::test]
    async fn test_run_syncs_both_calendars() {
        let calendar = FakeCalendar::default()
            .with(PUBLIC, vec![RawEvent::all_day(day(2024, 1, 26), "Republic Day")])
            .with(WORK, vec![RawEvent::all_day(day(2024, 3, 8), "Founders Day")]);
        let mut picker = HolidayPicker::new(FakeIdentity { deny: false }, calendar, config());
        let lookup = picker.lookup();

        assert_eq!(picker.state(), SyncState::Unauthenticated);
        picker.run().await.unwrap();

        assert_eq!(picker.state(), SyncState::Synced);
        assert_eq!(picker.calendar.calls.get(), 2);

        let republic = lookup.lookup(day(2024, 1, 26)).unwrap();
        assert_eq!(republic.classification(), Classification::Public);
        let founders = lookup.lookup(day(2024, 3, 8)).unwrap();
        assert_eq!(founders.classification(), Classification::Work);
        assert!(lookup.lookup(day(2024, 1, 27)).is_none());
    }

    #[tokio::test]
    async fn test_failed_work_fetch_keeps_empty_set_on_first_sync() {
        let calendar = FakeCalendar::default()
            .with(PUBLIC, vec![RawEvent::all_day(day(2024, 1, 26), "Republic Day")]);
        let mut picker = HolidayPicker::new(FakeIdentity { deny: false }, calendar, config());

        let err = picker.run().await.unwrap_err();

        assert!(matches!(err, SyncError::Fetch(ref e) if e.calendar_id == WORK));
        assert!(matches!(picker.state(), SyncState::SyncFailed(_)));
        assert!(picker.holidays().is_empty());
    }

    #[tokio::test]
    async fn test_failed_resync_keeps_previous_holidays() {
        let calendar = FakeCalendar::default()
            .with(PUBLIC, vec![RawEvent::all_day(day(2024, 1, 26), "Republic Day")])
            .with(WORK, vec![]);
        let mut picker = HolidayPicker::new(FakeIdentity { deny: false }, calendar, config());
        let lookup = picker.lookup();

        picker.run().await.unwrap();
        let before = lookup.snapshot();

        picker.calendar.remove(WORK);
        assert!(picker.sync().await.is_err());

        assert!(matches!(picker.state(), SyncState::SyncFailed(_)));
        assert_eq!(*lookup.snapshot(), *before);
        assert!(lookup.lookup(day(2024, 1, 26)).is_some());
    }

    #[tokio::test]
    async fn test_denied_auth_stays_authenticating() {
        let mut picker =
            HolidayPicker::new(FakeIdentity { deny: true }, FakeCalendar::default(), config());

        let err = picker.run().await.unwrap_err();

        assert!(matches!(err, SyncError::Auth(AuthError::Denied(_))));
        assert_eq!(picker.state(), SyncState::Authenticating);
        assert_eq!(picker.calendar.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_sync_requires_credential() {
        let mut picker =
            HolidayPicker::new(FakeIdentity { deny: false }, FakeCalendar::default(), config());

        let err = picker.sync().await.unwrap_err();

        assert!(matches!(err, SyncError::NotAuthenticated));
        assert_eq!(picker.state(), SyncState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_malformed_event_fails_sync() {
        let calendar = FakeCalendar::default().with(PUBLIC, vec![]).with(
            WORK,
            vec![RawEvent {
                start: None,
                summary: Some("Mystery".to_string()),
            }],
        );
        let mut picker = HolidayPicker::new(FakeIdentity { deny: false }, calendar, config());

        let err = picker.run().await.unwrap_err();

        assert!(matches!(err, SyncError::Holiday(_)));
        assert!(matches!(picker.state(), SyncState::SyncFailed(_)));
        assert!(picker.holidays().is_empty());
    }

    #[tokio::test]
    async fn test_state_subscribers_see_final_state() {
        let calendar = FakeCalendar::default().with(PUBLIC, vec![]).with(WORK, vec![]);
        let mut picker = HolidayPicker::new(FakeIdentity { deny: false }, calendar, config());
        let mut states = picker.subscribe_state();

        picker.run().await.unwrap();

        assert!(states.has_changed().unwrap());
        assert_eq!(*states.borrow_and_update(), SyncState::Synced);
        assert!(!SyncState::Synced.is_loading());
        assert!(SyncState::Syncing.is_loading());
    }
}
