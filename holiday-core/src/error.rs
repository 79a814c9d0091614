//! Error types for holiday-picker.

use thiserror::Error;

use crate::holiday::Classification;

/// Errors raised while building holiday data or loading configuration.
#[derive(Error, Debug)]
pub enum HolidayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{classification} calendar event #{index} has neither an all-day date nor a start time")]
    MalformedEvent {
        classification: Classification,
        index: usize,
    },
}

/// The identity collaborator could not produce a credential.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("Authorization denied: {0}")]
    Denied(String),
}

/// A calendar fetch was rejected.
#[derive(Error, Debug)]
#[error("Failed to fetch calendar '{calendar_id}': {message}")]
pub struct FetchError {
    pub calendar_id: String,
    pub message: String,
}

impl FetchError {
    pub fn new(calendar_id: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError {
            calendar_id: calendar_id.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by the sync orchestrator.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Holiday(#[from] HolidayError),
}

/// Result type alias for holiday operations.
pub type HolidayResult<T> = Result<T, HolidayError>;
