//! Filesystem locations used by roost.

use std::path::{Path, PathBuf};

use crate::error::{Result, RoostError};

/// Environment variable that overrides the settings directory.
pub const CONFIG_DIR_ENV: &str = "ROOST_CONFIG_DIR";

const APP_DIR: &str = "roost";
const DOT_DIR: &str = ".roost";
const SETTINGS_FILE: &str = "settings.yaml";

/// Resolved locations for settings, VM storage and caches.
///
/// Every path the rest of the crate touches is derived from three roots:
/// the user's home directory, the settings directory and the platform cache
/// directory. Tests build these roots inside a temp directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPaths {
    home: PathBuf,
    config_dir: PathBuf,
    cache_root: PathBuf,
}

impl SettingsPaths {
    /// Create paths from explicit roots.
    pub fn new(
        home: impl Into<PathBuf>,
        config_dir: impl Into<PathBuf>,
        cache_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            home: home.into(),
            config_dir: config_dir.into(),
            cache_root: cache_root.into(),
        }
    }

    /// Discover the platform locations for the current user.
    ///
    /// `ROOST_CONFIG_DIR` takes precedence over the platform config directory.
    pub fn discover() -> Result<Self> {
        let home = dirs::home_dir().ok_or(RoostError::HomeDirUnavailable)?;

        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .unwrap_or_else(|| home.join(".config"))
                .join(APP_DIR),
        };

        let cache_root = dirs::cache_dir().unwrap_or_else(|| home.join(".cache"));

        Ok(Self::new(home, config_dir, cache_root))
    }

    /// The user's home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Directory holding `settings.yaml`.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// The settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Where VMs live unless `home_directory` says otherwise.
    pub fn default_vm_dir(&self) -> PathBuf {
        self.home.join(DOT_DIR).join("vms")
    }

    /// Where cached images live unless `cache_directory` says otherwise.
    pub fn default_cache_dir(&self) -> PathBuf {
        self.cache_root.join(APP_DIR)
    }

    /// The deprecated cache location (`~/.roost/cache`).
    pub fn legacy_cache_dir(&self) -> PathBuf {
        self.home.join(DOT_DIR).join("cache")
    }

    /// Expand a leading `~` against the home directory.
    pub fn expand(&self, raw: &str) -> PathBuf {
        if raw == "~" {
            return self.home.clone();
        }
        match raw.strip_prefix("~/") {
            Some(rest) => self.home.join(rest),
            None => PathBuf::from(raw),
        }
    }

    /// Render a path with the home directory collapsed to `~`.
    pub fn contract(&self, path: &Path) -> String {
        match path.strip_prefix(&self.home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        }
    }
}
