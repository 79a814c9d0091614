//! Application configuration at ~/.config/holiday-picker/config.toml
//!
//! Every key can also be set from the environment with a `HOLIDAY_PICKER_`
//! prefix, e.g. `HOLIDAY_PICKER_WORK_CALENDAR_ID`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{HolidayError, HolidayResult};
use crate::window::YearWindow;

pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";
pub const DEFAULT_PUBLIC_CALENDAR_ID: &str = "en.indian#holiday@group.v.calendar.google.com";

const ENV_PREFIX: &str = "HOLIDAY_PICKER";

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}

fn default_public_calendar_id() -> String {
    DEFAULT_PUBLIC_CALENDAR_ID.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,

    #[serde(default = "default_scope")]
    pub scope: String,

    #[serde(default = "default_public_calendar_id")]
    pub public_calendar_id: String,

    pub work_calendar_id: Option<String>,

    /// Defaults to the current local year.
    pub year: Option<i32>,
}

/// What the sync orchestrator needs, with required keys checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub client_id: String,
    pub scope: String,
    pub public_calendar_id: String,
    pub work_calendar_id: String,
    pub window: YearWindow,
}

/// ~/.config/holiday-picker
pub fn base_dir() -> HolidayResult<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| HolidayError::Config("Could not determine config directory".into()))?
        .join("holiday-picker"))
}

impl AppConfig {
    pub fn config_path() -> HolidayResult<PathBuf> {
        Ok(base_dir()?.join("config.toml"))
    }

    /// Load the config file, creating a commented template on first run.
    pub fn load() -> HolidayResult<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
            tracing::info!("created default config at {}", path.display());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> HolidayResult<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Environment values override the file.
    fn load_with_env(path: &Path, env: Environment) -> HolidayResult<Self> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env)
            .build()
            .map_err(|e| HolidayError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HolidayError::Config(e.to_string()))
    }

    pub fn window(&self) -> HolidayResult<YearWindow> {
        match self.year {
            Some(year) => YearWindow::new(year)
                .ok_or_else(|| HolidayError::Config(format!("Year {} is out of range", year))),
            None => Ok(YearWindow::current()),
        }
    }

    pub fn client_id(&self) -> HolidayResult<&str> {
        required(self.client_id.as_deref(), "client_id")
    }

    pub fn client_secret(&self) -> HolidayResult<&str> {
        required(self.client_secret.as_deref(), "client_secret")
    }

    pub fn sync_config(&self) -> HolidayResult<SyncConfig> {
        Ok(SyncConfig {
            client_id: self.client_id()?.to_string(),
            scope: self.scope.clone(),
            public_calendar_id: self.public_calendar_id.clone(),
            work_calendar_id: required(self.work_calendar_id.as_deref(), "work_calendar_id")?
                .to_string(),
            window: self.window()?,
        })
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HolidayResult<()> {
        let contents = format!(
            "\
# holiday-picker configuration

# OAuth client from https://console.cloud.google.com/apis/credentials
# (type: Desktop app, with the Google Calendar API enabled):
# client_id = \"your-client-id.apps.googleusercontent.com\"
# client_secret = \"your-client-secret\"

# scope = \"{}\"

# Calendar whose events are public holidays:
# public_calendar_id = \"{}\"

# Calendar whose events are work holidays:
# work_calendar_id = \"you@example.com\"

# Year to show (defaults to the current year):
# year = 2024
",
            DEFAULT_SCOPE, DEFAULT_PUBLIC_CALENDAR_ID
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HolidayError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HolidayError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> HolidayResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => {
            let path = AppConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "config.toml".to_string());

            Err(HolidayError::Config(format!(
                "`{key}` is not set.\n\n\
                Add it to {path}\n\
                or set {ENV_PREFIX}_{} in the environment.",
                key.to_uppercase()
            )))
        }
    }
}
