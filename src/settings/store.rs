//! Settings file persistence.
//!
//! This module provides the [`Settings`] struct stored in
//! `settings.yaml`. Missing fields fall back to platform defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{Result, RoostError};

use super::SettingsPaths;

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Where VM directories live. `~` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_directory: Option<String>,

    /// Where cached images live. `~` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_directory: Option<String>,

    /// Whether downloaded images are kept in the cache.
    #[serde(default = "default_caching_enabled")]
    pub caching_enabled: bool,
}

fn default_caching_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home_directory: None,
            cache_directory: None,
            caching_enabled: default_caching_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist.
    pub async fn load(path: &Path) -> Result<Self> {
        if !fs::try_exists(path).await? {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| RoostError::SettingsParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save settings to disk using atomic write.
    ///
    /// Uses the write-to-temp-then-rename pattern to prevent corruption.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let content = serde_yaml::to_string(self).map_err(|e| RoostError::Serialization {
            message: format!("Failed to serialize settings: {}", e),
        })?;

        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &content).await?;
        fs::rename(&temp_path, path).await?;

        Ok(())
    }

    /// Resolved VM storage directory.
    pub fn vm_dir(&self, paths: &SettingsPaths) -> PathBuf {
        self.home_directory
            .as_deref()
            .map(|raw| paths.expand(raw))
            .unwrap_or_else(|| paths.default_vm_dir())
    }

    /// Resolved image cache directory.
    pub fn cache_dir(&self, paths: &SettingsPaths) -> PathBuf {
        self.cache_directory
            .as_deref()
            .map(|raw| paths.expand(raw))
            .unwrap_or_else(|| paths.default_cache_dir())
    }
}
