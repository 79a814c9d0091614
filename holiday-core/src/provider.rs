//! Seams to the external identity and calendar services.

use std::fmt;
use std::future::Future;

use crate::error::{AuthError, FetchError};
use crate::event::RawEvent;
use crate::window::YearWindow;

/// An opaque bearer token presented with each calendar request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    pub fn bearer(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Issues access credentials for a client.
pub trait IdentityProvider {
    /// Resolve once with a credential for `client_id` and `scope`.
    fn request_credential(
        &self,
        client_id: &str,
        scope: &str,
    ) -> impl Future<Output = Result<Credential, AuthError>>;
}

/// Fetches events from a hosted calendar.
pub trait CalendarClient {
    /// Events starting in `window`, expanded into single instances and
    /// ordered by start time.
    fn fetch_events(
        &self,
        calendar_id: &str,
        credential: &Credential,
        window: &YearWindow,
    ) -> impl Future<Output = Result<Vec<RawEvent>, FetchError>>;
}
