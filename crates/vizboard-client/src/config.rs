//! Client settings, persisted as TOML in the user's config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vizboard_model::Locale;

use crate::error::Result;

/// Default API server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default export format.
pub const DEFAULT_EXPORT_FORMAT: &str = "png";

/// Client settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api: ApiSettings,
    pub export: ExportSettings,
    pub display: DisplaySettings,
}

/// Where the API lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,

    /// Origin of the web app, used to build export targets. Falls back to
    /// `base_url` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_origin: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_origin: None,
        }
    }
}

impl ApiSettings {
    /// Origin used for `/visualisation/{id}` links, without a trailing slash.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.app_origin
            .as_deref()
            .unwrap_or(&self.base_url)
            .trim_end_matches('/')
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub default_format: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            default_format: DEFAULT_EXPORT_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub locale: Locale,
}

impl ClientSettings {
    /// Load settings from the default path.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from a specific path, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "ignoring malformed settings");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Load settings from a specific path, reporting parse failures.
    pub fn try_load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save settings to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "Vizboard", "Vizboard")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }
}
