//! Core types for holiday-picker.
//!
//! - `event`: provider-neutral raw events handed over by calendar providers
//! - `holiday` / `holiday_set`: merged holiday records and the per-day lookup
//! - `provider`: the identity and calendar client seams
//! - `sync`: the authenticate-then-sync state machine

pub mod config;
pub mod error;
pub mod event;
pub mod holiday;
pub mod holiday_set;
pub mod lookup;
pub mod provider;
pub mod sync;
pub mod window;

pub use error::{AuthError, FetchError, HolidayError, HolidayResult, SyncError};
pub use event::{EventStart, RawEvent};
pub use holiday::{Classification, HolidayRecord};
pub use holiday_set::HolidaySet;
pub use lookup::HolidayLookup;
pub use provider::{CalendarClient, Credential, IdentityProvider};
pub use sync::{HolidayPicker, SyncState};
pub use window::YearWindow;
