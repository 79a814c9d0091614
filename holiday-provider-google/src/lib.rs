//! Google Calendar collaborators for holiday-picker.
//!
//! - [`GoogleIdentity`] issues access tokens (browser consent, stored and
//!   refreshed session)
//! - [`GoogleCalendar`] lists a calendar's events for a year
//!
//! The session lives at ~/.config/holiday-picker/google/session.toml

mod auth;
mod calendar;
mod convert;
mod session;

pub use auth::GoogleIdentity;
pub use calendar::GoogleCalendar;

/// OAuth client credentials from the app config.
#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}
