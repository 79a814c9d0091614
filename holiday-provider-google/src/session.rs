//! Stored Google OAuth session (access + refresh token).
//!
//! Kept at ~/.config/holiday-picker/google/session.toml, owner-only.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};

use crate::GoogleCredentials;

/// Refresh a little before Google's deadline so a request never races expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    access_token: String,
    refresh_token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl From<&AccessToken> for Session {
    fn from(tokens: &AccessToken) -> Self {
        let expires_at = if tokens.expires_in > 0 {
            Some(Utc::now() + Duration::seconds(tokens.expires_in))
        } else {
            None
        };

        Session {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at,
        }
    }
}

impl Session {
    pub fn default_path() -> Result<PathBuf> {
        Ok(holiday_core::config::base_dir()?
            .join("google")
            .join("session.toml"))
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Load a stored session, or `None` if there is none yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).with_context(|| {
            format!("Failed to read Google OAuth session from {}", path.display())
        })?;

        let session: Session = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse Google OAuth session from {}", path.display())
        })?;

        Ok(Some(session))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize session")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;

        // Owner-only (0600), the file holds OAuth tokens
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
        }

        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= expires_at,
            None => false,
        }
    }

    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    pub async fn refresh(&mut self, creds: &GoogleCredentials) -> Result<()> {
        let client = Client::new(
            creds.client_id.clone(),
            creds.client_secret.clone(),
            String::new(),
            self.access_token.clone(),
            self.refresh_token.clone(),
        );

        let mut tokens = client
            .refresh_access_token()
            .await
            .context("Failed to refresh token")?;

        // Google usually omits the refresh token on refresh
        if tokens.refresh_token.is_empty() {
            tokens.refresh_token = self.refresh_token.clone();
        }

        *self = (&tokens).into();
        tracing::debug!(expires_at = ?self.expires_at, "refreshed Google access token");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: Option<DateTime<Utc>>) -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("google").join("session.toml");
        let saved = session(Some(Utc::now() + Duration::hours(1)));

        saved.save(&path).unwrap();
        let loaded = Session::load(&path).unwrap().unwrap();

        assert_eq!(loaded.access_token(), "access");
        assert!(!loaded.is_expired());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_missing_session_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Session::load(&dir.path().join("nope.toml")).unwrap().is_none());
    }

    #[test]
    fn test_expiry() {
        assert!(session(Some(Utc::now() - Duration::minutes(5))).is_expired());
        // Inside the safety margin counts as expired
        assert!(session(Some(Utc::now() + Duration::seconds(10))).is_expired());
        assert!(!session(Some(Utc::now() + Duration::hours(1))).is_expired());
        assert!(!session(None).is_expired());
    }
}
