//! Settings loading and the one-shot cache migration.
//!
//! - [`paths`] - Platform locations (home, settings file, caches)
//! - [`store`] - The `settings.yaml` file
//! - [`migration`] - Moving the deprecated cache directory into place
//! - [`manager`] - [`SettingsManager`], the service commands receive

pub mod manager;
pub mod migration;
pub mod paths;
pub mod store;

pub use manager::SettingsManager;
pub use migration::{migrate_cache_dir, MigrationOutcome};
pub use paths::{SettingsPaths, CONFIG_DIR_ENV};
pub use store::Settings;
