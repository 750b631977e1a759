//! Configuration module
//!
//! Startup happens in two phases. `Settings::from_env` reads the process
//! environment (and `.env`, if present). The selected album's display name is
//! then resolved against the storage service, and `Config::new` freezes both
//! into the immutable configuration shared by every handler.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

use chrono_tz::Tz;

use crate::access::AllowList;
use crate::constants::DEFAULT_UPLOAD_TIMEZONE;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("UPLOAD_TIMEZONE '{0}' is not a valid IANA timezone")]
    InvalidTimezone(String),

    #[error("ALLOWED_USER_IDS is invalid: {0}")]
    InvalidUserIds(String),
}

/// Raw settings read from the environment, before the album lookup.
#[derive(Clone)]
pub struct Settings {
    pub immich_api_url: String,
    pub immich_api_key: String,
    pub selected_album_id: Option<String>,
    pub upload_timezone: Tz,
    pub telegram_bot_token: String,
    pub allowed_user_ids: AllowList,
    pub staging_dir: PathBuf,
}

impl Debug for Settings {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Settings")
            .field("immich_api_url", &self.immich_api_url)
            .field("immich_api_key", &"[REDACTED]")
            .field("selected_album_id", &self.selected_album_id)
            .field("upload_timezone", &self.upload_timezone)
            .field("telegram_bot_token", &"[REDACTED]")
            .field("allowed_user_ids", &self.allowed_user_ids)
            .field("staging_dir", &self.staging_dir)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut missing = Vec::new();

        let telegram_bot_token = var("TELEGRAM_BOT_TOKEN");
        if telegram_bot_token.is_none() {
            missing.push("TELEGRAM_BOT_TOKEN");
        }
        let immich_api_key = var("IMMICH_API_KEY");
        if immich_api_key.is_none() {
            missing.push("IMMICH_API_KEY");
        }
        let immich_api_url = var("IMMICH_API_URL");
        if immich_api_url.is_none() {
            missing.push("IMMICH_API_URL");
        }

        // A malformed list is reported only once nothing is missing.
        let allowed_user_ids = var("ALLOWED_USER_IDS")
            .map(|raw| AllowList::parse(&raw))
            .unwrap_or_else(|| Ok(AllowList::default()));
        if matches!(&allowed_user_ids, Ok(ids) if ids.is_empty()) {
            missing.push("ALLOWED_USER_IDS");
        }

        let (Some(telegram_bot_token), Some(immich_api_key), Some(immich_api_url)) =
            (telegram_bot_token, immich_api_key, immich_api_url)
        else {
            return Err(ConfigError::Missing(missing));
        };
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        let allowed_user_ids = allowed_user_ids.map_err(ConfigError::InvalidUserIds)?;

        let timezone_name =
            var("UPLOAD_TIMEZONE").unwrap_or_else(|| DEFAULT_UPLOAD_TIMEZONE.to_string());
        let upload_timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimezone(timezone_name.clone()))?;

        let staging_dir = var("STAGING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);

        Ok(Settings {
            immich_api_url: immich_api_url.trim_end_matches('/').to_string(),
            immich_api_key,
            selected_album_id: var("IMMICH_SELECTED_ALBUM"),
            upload_timezone,
            telegram_bot_token,
            allowed_user_ids,
            staging_dir,
        })
    }
}

/// Immutable application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    settings: Settings,
    selected_album_name: Option<String>,
}

impl Config {
    /// Freeze settings together with the resolved album name.
    pub fn new(settings: Settings, selected_album_name: Option<String>) -> Self {
        Self {
            settings,
            selected_album_name,
        }
    }

    pub fn selected_album_id(&self) -> Option<&str> {
        self.settings.selected_album_id.as_deref()
    }

    pub fn selected_album_name(&self) -> Option<&str> {
        self.selected_album_name.as_deref()
    }

    pub fn upload_timezone(&self) -> Tz {
        self.settings.upload_timezone
    }

    pub fn telegram_bot_token(&self) -> &str {
        &self.settings.telegram_bot_token
    }

    pub fn allowed_user_ids(&self) -> &AllowList {
        &self.settings.allowed_user_ids
    }

    pub fn staging_dir(&self) -> &Path {
        &self.settings.staging_dir
    }
}
