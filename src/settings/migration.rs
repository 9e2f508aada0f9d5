//! Cache directory migration.
//!
//! Older releases kept cached images in `~/.roost/cache`. The cache now lives
//! in the platform cache directory. [`migrate_cache_dir`] moves the old
//! directory into place and rewrites a settings file that still points at it.
//!
//! The filesystem move happens before the settings rewrite. If the process
//! dies in between, the next run finds no legacy directory but a legacy-valued
//! setting and only rewrites the setting.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{Result, RoostError};
use crate::sys::{copy_dir_all, is_dir, is_empty_dir};

use super::{Settings, SettingsPaths};

const STAGING_SUFFIX: &str = "migrating";

/// What a migration check found and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Nothing deprecated on disk or in settings.
    Unchanged,

    /// The legacy directory was moved to the current location.
    Moved { from: PathBuf, to: PathBuf },

    /// The legacy directory was empty and has been removed.
    LegacyRemoved { legacy: PathBuf },

    /// Both directories hold content; the legacy one was left alone.
    LegacyDetected { legacy: PathBuf, current: PathBuf },

    /// Only the settings file referenced the legacy location.
    SettingNormalized { from: String, to: String },
}

impl MigrationOutcome {
    /// Human-readable note, if anything changed or was detected.
    pub fn note(&self) -> Option<String> {
        match self {
            Self::Unchanged => None,
            Self::Moved { from, to } => Some(format!(
                "Migrated deprecated cache directory {} to {}",
                from.display(),
                to.display()
            )),
            Self::LegacyRemoved { legacy } => Some(format!(
                "Removed empty deprecated cache directory {}",
                legacy.display()
            )),
            Self::LegacyDetected { legacy, current } => Some(format!(
                "Deprecated cache directory {} is no longer used (cache lives in {}); remove it to reclaim space",
                legacy.display(),
                current.display()
            )),
            Self::SettingNormalized { from, to } => Some(format!(
                "Updated cache_directory setting from deprecated {} to {}",
                from, to
            )),
        }
    }
}

/// Bring the cache layout and settings file into the current form.
///
/// Returns the outcome; I/O failures while moving become
/// [`RoostError::Migration`].
pub async fn migrate_cache_dir(paths: &SettingsPaths) -> Result<MigrationOutcome> {
    let settings_file = paths.settings_file();
    let mut settings = Settings::load(&settings_file).await?;

    let legacy = paths.legacy_cache_dir();
    let mut normalized_from = None;

    let target = match settings.cache_directory.as_deref() {
        Some(raw) if paths.expand(raw) == legacy => {
            let current = paths.default_cache_dir();
            normalized_from = Some(raw.to_string());
            settings.cache_directory = Some(paths.contract(&current));
            current
        }
        Some(raw) => paths.expand(raw),
        None => paths.default_cache_dir(),
    };

    let as_migration_error = |source: io::Error| RoostError::Migration {
        from: legacy.clone(),
        to: target.clone(),
        source,
    };

    discard_stale_staging(&target)
        .await
        .map_err(as_migration_error)?;

    let legacy_exists = is_dir(&legacy).await.map_err(as_migration_error)?;
    let mut target_exists = fs::try_exists(&target)
        .await
        .map_err(as_migration_error)?;

    // An empty target counts as absent.
    if legacy_exists
        && target_exists
        && replaceable_target(&legacy, &target)
            .await
            .map_err(as_migration_error)?
    {
        debug!(target = %target.display(), "Removing empty cache directory");
        fs::remove_dir(&target).await.map_err(as_migration_error)?;
        target_exists = false;
    }

    debug!(
        legacy = %legacy.display(),
        target = %target.display(),
        legacy_exists,
        target_exists,
        "Checked cache directory layout"
    );

    let outcome = if legacy_exists && !target_exists {
        move_dir(&legacy, &target)
            .await
            .map_err(as_migration_error)?;
        MigrationOutcome::Moved {
            from: legacy.clone(),
            to: target.clone(),
        }
    } else if legacy_exists && is_empty_dir(&legacy).await.map_err(as_migration_error)? {
        fs::remove_dir(&legacy).await.map_err(as_migration_error)?;
        MigrationOutcome::LegacyRemoved {
            legacy: legacy.clone(),
        }
    } else if legacy_exists {
        MigrationOutcome::LegacyDetected {
            legacy: legacy.clone(),
            current: target.clone(),
        }
    } else if let Some(from) = normalized_from.clone() {
        MigrationOutcome::SettingNormalized {
            from,
            to: paths.contract(&target),
        }
    } else {
        MigrationOutcome::Unchanged
    };

    if normalized_from.is_some() {
        settings.save(&settings_file).await?;
    }

    Ok(outcome)
}

async fn replaceable_target(legacy: &Path, target: &Path) -> io::Result<bool> {
    Ok(is_dir(target).await? && is_empty_dir(target).await? && !is_empty_dir(legacy).await?)
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(STAGING_SUFFIX);
    target.with_file_name(name)
}

/// Remove a half-copied staging directory left by an interrupted run.
async fn discard_stale_staging(target: &Path) -> io::Result<()> {
    let staging = staging_path(target);
    if fs::try_exists(&staging).await? {
        debug!(staging = %staging.display(), "Removing stale staging directory");
        fs::remove_dir_all(&staging).await?;
    }
    Ok(())
}

async fn move_dir(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).await?;
    }

    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("Rename crosses devices, copying instead");
            copy_via_staging(from, to).await
        }
        Err(e) => Err(e),
    }
}

/// Copy into `<to>.migrating`, swap it into place, then drop the source.
async fn copy_via_staging(from: &Path, to: &Path) -> io::Result<()> {
    let staging = staging_path(to);
    copy_dir_all(from, &staging).await?;
    fs::rename(&staging, to).await?;
    fs::remove_dir_all(from).await
}
