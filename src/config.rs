//! Client settings.
//!
//! Settings are persisted as `settings.json` in the application data
//! directory. A missing file yields the defaults.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings filename inside the application data directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "GRADUATION_API_URL";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    /// Base URL of the backend API (e.g., `https://grad.example.edu/api`).
    pub api_base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Page size used when walking paginated collections.
    pub page_size: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
            page_size: 50,
        }
    }
}

impl ClientSettings {
    /// Path of the settings file inside `dir`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(SETTINGS_FILE)
    }

    /// Load settings from `dir`, using defaults if the file does not exist.
    ///
    /// The `GRADUATION_API_URL` environment variable, when set, replaces
    /// the stored base URL.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let path = Self::path_in(dir);

        let mut settings = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::configuration(format!("Invalid {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("[settings] No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                settings.api_base_url = url;
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to `dir`, creating the directory if needed.
    pub fn save(&self, dir: &Path) -> Result<(), AppError> {
        self.validate()?;
        std::fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::path_in(dir), json)?;
        Ok(())
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::invalid_input_field(
                "API URL must start with http:// or https://",
                "apiBaseUrl",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::invalid_input_field(
                "Timeout must be at least one second",
                "timeoutSecs",
            ));
        }
        if !(1..=500).contains(&self.page_size) {
            return Err(AppError::invalid_input_field(
                "Page size must be between 1 and 500",
                "pageSize",
            ));
        }
        Ok(())
    }
}
