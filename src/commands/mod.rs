pub mod auth;
pub mod list;
pub mod lookup;
pub mod show;

use anyhow::Result;
use holiday_core::config::AppConfig;
use holiday_core::{HolidayPicker, SyncError};
use holiday_provider_google::{GoogleCalendar, GoogleIdentity};
use owo_colors::OwoColorize;

use crate::utils::tui::create_spinner;

pub type Picker = HolidayPicker<GoogleIdentity, GoogleCalendar>;

/// Build the picker from ~/.config/holiday-picker/config.toml
pub fn load_picker() -> Result<Picker> {
    let app_config = AppConfig::load()?;
    let sync_config = app_config.sync_config()?;
    tracing::debug!(
        year = sync_config.window.year(),
        public = %sync_config.public_calendar_id,
        work = %sync_config.work_calendar_id,
        "loaded config"
    );

    let identity = GoogleIdentity::new(app_config.client_secret()?)?;

    Ok(HolidayPicker::new(identity, GoogleCalendar::new(), sync_config))
}

/// Authenticate, then sync with a spinner.
///
/// Auth failures are returned. A failed sync is reported on stderr and
/// returned as `Ok(Some(error))` so callers can still render what they have.
pub async fn authenticate_and_sync(picker: &mut Picker) -> Result<Option<SyncError>> {
    picker.authenticate().await?;

    let mut states = picker.subscribe_state();
    let spinner = create_spinner("Loading holidays");

    let sync = picker.sync();
    tokio::pin!(sync);

    // The spinner lives as long as the picker reports loading
    let result = loop {
        tokio::select! {
            result = &mut sync => break result,
            Ok(()) = states.changed() => {
                if !states.borrow_and_update().is_loading() {
                    spinner.finish_and_clear();
                }
            }
        }
    };
    spinner.finish_and_clear();

    match result {
        Ok(()) => Ok(None),
        Err(e) => {
            eprintln!("{} {}", "Failed to load holidays:".red(), e);
            Ok(Some(e))
        }
    }
}
