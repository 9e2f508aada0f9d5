//! The settings service handed to every command.

use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;

use super::migration::{migrate_cache_dir, MigrationOutcome};
use super::{Settings, SettingsPaths};

/// Per-process guard state.
#[derive(Debug, Default)]
struct GuardState {
    /// Migration logic already ran to completion.
    checked: bool,
    /// The deprecation note was already logged.
    deprecation_emitted: bool,
}

/// Owns the resolved paths, settings I/O and the one-shot cache migration.
///
/// One manager is constructed at startup and shared (`Arc`) with whatever
/// needs settings. The guard flags live behind an async mutex so a
/// long-running host like the API server can hold the same instance.
#[derive(Debug)]
pub struct SettingsManager {
    paths: SettingsPaths,
    guard: Mutex<GuardState>,
}

impl SettingsManager {
    /// Create a manager over explicit paths.
    pub fn new(paths: SettingsPaths) -> Self {
        Self {
            paths,
            guard: Mutex::new(GuardState::default()),
        }
    }

    /// Create a manager over the current user's platform paths.
    pub fn discover() -> Result<Self> {
        Ok(Self::new(SettingsPaths::discover()?))
    }

    /// Resolved paths.
    pub fn paths(&self) -> &SettingsPaths {
        &self.paths
    }

    /// Load the settings file.
    pub async fn load(&self) -> Result<Settings> {
        Settings::load(&self.paths.settings_file()).await
    }

    /// Persist the settings file.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        settings.save(&self.paths.settings_file()).await
    }

    /// Resolved VM storage directory.
    pub async fn vm_dir(&self) -> Result<PathBuf> {
        Ok(self.load().await?.vm_dir(&self.paths))
    }

    /// Resolved image cache directory.
    pub async fn cache_dir(&self) -> Result<PathBuf> {
        Ok(self.load().await?.cache_dir(&self.paths))
    }

    /// Point the cache at a new directory. Returns the expanded path.
    pub async fn set_cache_directory(&self, raw: &str) -> Result<PathBuf> {
        let mut settings = self.load().await?;
        let expanded = self.paths.expand(raw);
        settings.cache_directory = Some(self.paths.contract(&expanded));
        self.save(&settings).await?;
        Ok(expanded)
    }

    /// Turn image caching on or off.
    pub async fn set_caching_enabled(&self, enabled: bool) -> Result<()> {
        let mut settings = self.load().await?;
        settings.caching_enabled = enabled;
        self.save(&settings).await
    }

    /// Run the cache migration if this manager hasn't yet.
    ///
    /// Returns the deprecation note when something changed or was detected
    /// and the note hasn't been emitted. Later calls on the same manager
    /// return `None` without touching the filesystem. A failed migration
    /// leaves the manager unchecked.
    pub async fn check_and_migrate(&self) -> Result<Option<String>> {
        let mut guard = self.guard.lock().await;
        if guard.checked {
            debug!("Cache migration already checked");
            return Ok(None);
        }

        let outcome = migrate_cache_dir(&self.paths).await?;
        guard.checked = true;

        if outcome == MigrationOutcome::Unchanged || guard.deprecation_emitted {
            return Ok(None);
        }
        Ok(outcome.note())
    }

    /// Record that the deprecation note has been logged.
    pub async fn mark_deprecation_emitted(&self) {
        self.guard.lock().await.deprecation_emitted = true;
    }

    /// Whether the deprecation note has been logged.
    pub async fn deprecation_emitted(&self) -> bool {
        self.guard.lock().await.deprecation_emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn manager(temp: &TempDir) -> SettingsManager {
        SettingsManager::new(SettingsPaths::new(
            temp.path().join("home"),
            temp.path().join("config"),
            temp.path().join("cache"),
        ))
    }

    fn seed_legacy(manager: &SettingsManager) {
        let legacy = manager.paths().legacy_cache_dir();
        std::fs::create_dir_all(&legacy).unwrap();
        std::fs::write(legacy.join("debian.img"), b"disk").unwrap();
    }

    #[tokio::test]
    async fn migrates_once_per_manager() {
        let temp = TempDir::new().unwrap();
        let m = manager(&temp);
        seed_legacy(&m);

        let note = m.check_and_migrate().await.unwrap();
        assert!(note.unwrap().contains("Migrated deprecated cache directory"));

        // Re-seed: the same manager must not look again.
        seed_legacy(&m);
        assert!(m.check_and_migrate().await.unwrap().is_none());
        assert!(m.paths().legacy_cache_dir().exists());
    }

    #[tokio::test]
    async fn fresh_manager_after_migration_is_noop() {
        let temp = TempDir::new().unwrap();
        seed_legacy(&manager(&temp));

        assert!(manager(&temp).check_and_migrate().await.unwrap().is_some());
        assert!(manager(&temp).check_and_migrate().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn emitted_flag_suppresses_note() {
        let temp = TempDir::new().unwrap();
        let m = manager(&temp);
        seed_legacy(&m);

        assert!(!m.deprecation_emitted().await);
        m.mark_deprecation_emitted().await;
        assert!(m.deprecation_emitted().await);

        assert!(m.check_and_migrate().await.unwrap().is_none());
        // The move still happened.
        assert!(m.paths().default_cache_dir().join("debian.img").exists());
    }

    #[tokio::test]
    async fn concurrent_checks_yield_one_note() {
        let temp = TempDir::new().unwrap();
        let m = Arc::new(manager(&temp));
        seed_legacy(&m);

        let (a, b) = tokio::join!(m.check_and_migrate(), m.check_and_migrate());
        let notes = [a.unwrap(), b.unwrap()];
        assert_eq!(notes.iter().filter(|n| n.is_some()).count(), 1);
    }

    #[tokio::test]
    async fn set_cache_directory_persists() {
        let temp = TempDir::new().unwrap();
        let m = manager(&temp);

        let expanded = m.set_cache_directory("~/images").await.unwrap();
        assert_eq!(expanded, m.paths().home().join("images"));
        assert_eq!(m.cache_dir().await.unwrap(), expanded);
        assert_eq!(
            m.load().await.unwrap().cache_directory.as_deref(),
            Some("~/images")
        );
    }

    #[tokio::test]
    async fn set_caching_enabled_persists() {
        let temp = TempDir::new().unwrap();
        let m = manager(&temp);

        m.set_caching_enabled(false).await.unwrap();
        assert!(!m.load().await.unwrap().caching_enabled);
    }

    #[tokio::test]
    async fn defaults_without_settings_file() {
        let temp = TempDir::new().unwrap();
        let m = manager(&temp);
        assert_eq!(m.vm_dir().await.unwrap(), m.paths().default_vm_dir());
        assert_eq!(m.cache_dir().await.unwrap(), m.paths().default_cache_dir());
    }
}
