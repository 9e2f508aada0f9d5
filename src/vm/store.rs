//! On-disk VM inventory.
//!
//! Each VM is a directory under the VM storage root holding `config.json`.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{Result, RoostError};
use crate::sys::{copy_dir_all, is_dir};

use super::config::{CreateOptions, VmConfig, VmStatus, VmUpdate};

const CONFIG_FILE: &str = "config.json";
const MAX_NAME_LEN: usize = 64;

/// VM records rooted at one directory.
#[derive(Debug, Clone)]
pub struct VmStore {
    root: PathBuf,
}

impl VmStore {
    /// Create a store rooted at `root`. Nothing is touched until used.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a VM.
    pub fn vm_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn config_path(&self, name: &str) -> PathBuf {
        self.vm_dir(name).join(CONFIG_FILE)
    }

    /// Create a new VM record.
    pub async fn create(&self, name: &str, options: CreateOptions) -> Result<VmConfig> {
        validate_name(name)?;
        if fs::try_exists(self.vm_dir(name)).await? {
            return Err(RoostError::VmAlreadyExists {
                name: name.to_string(),
            });
        }

        let vm = VmConfig::new(name, options);
        fs::create_dir_all(self.vm_dir(name)).await?;
        self.save(&vm).await?;
        debug!(vm = name, "Created VM record");
        Ok(vm)
    }

    /// All VMs, sorted by name. Directories without a readable record are skipped.
    pub async fn list(&self) -> Result<Vec<VmConfig>> {
        if !is_dir(&self.root).await? {
            return Ok(Vec::new());
        }

        let mut vms = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if !entry.file_type().await?.is_dir() || name.starts_with('.') {
                continue;
            }
            match self.get(&name).await {
                Ok(vm) => vms.push(vm),
                Err(RoostError::VmNotFound { .. }) => {
                    debug!(dir = %entry.path().display(), "Skipping directory without VM record");
                }
                Err(e) => warn!(vm = %name, error = %e, "Skipping unreadable VM record"),
            }
        }

        vms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vms)
    }

    /// Load one VM.
    pub async fn get(&self, name: &str) -> Result<VmConfig> {
        validate_name(name)?;
        let path = self.config_path(name);
        let content = match fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RoostError::VmNotFound {
                    name: name.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist a VM record using write-to-temp-then-rename.
    pub async fn save(&self, vm: &VmConfig) -> Result<()> {
        write_record(&self.vm_dir(&vm.name), vm).await
    }

    /// Change the settings of a stopped VM.
    pub async fn update(&self, name: &str, update: &VmUpdate) -> Result<VmConfig> {
        let mut vm = self.get(name).await?;
        ensure_stopped(&vm)?;
        vm.apply(update)?;
        self.save(&vm).await?;
        Ok(vm)
    }

    /// Record a status change.
    pub async fn set_status(&self, name: &str, status: VmStatus) -> Result<VmConfig> {
        let mut vm = self.get(name).await?;
        vm.status = status;
        self.save(&vm).await?;
        Ok(vm)
    }

    /// Copy a stopped VM under a new name.
    pub async fn clone_vm(&self, name: &str, new_name: &str) -> Result<VmConfig> {
        let source = self.get(name).await?;
        ensure_stopped(&source)?;
        validate_name(new_name)?;
        if fs::try_exists(self.vm_dir(new_name)).await? {
            return Err(RoostError::VmAlreadyExists {
                name: new_name.to_string(),
            });
        }

        let mut cloned = source;
        cloned.name = new_name.to_string();
        cloned.created_at = chrono::Utc::now();

        // The clone only becomes visible once the staged copy is complete.
        let staging = self.root.join(format!(".{}.cloning", new_name));
        if fs::try_exists(&staging).await? {
            fs::remove_dir_all(&staging).await?;
        }
        let staged = async {
            copy_dir_all(&self.vm_dir(name), &staging).await?;
            write_record(&staging, &cloned).await
        };
        if let Err(e) = staged.await {
            if let Err(cleanup) = fs::remove_dir_all(&staging).await {
                warn!(dir = %staging.display(), error = %cleanup, "Failed to remove partial clone");
            }
            return Err(e);
        }
        fs::rename(&staging, self.vm_dir(new_name)).await?;

        debug!(vm = name, clone = new_name, "Cloned VM");
        Ok(cloned)
    }

    /// Remove a stopped VM and everything in its directory.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let vm = self.get(name).await?;
        ensure_stopped(&vm)?;
        fs::remove_dir_all(self.vm_dir(name)).await?;
        debug!(vm = name, "Deleted VM");
        Ok(())
    }
}

async fn write_record(dir: &Path, vm: &VmConfig) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    let content = serde_json::to_string_pretty(vm)?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, &path).await?;
    Ok(())
}

fn ensure_stopped(vm: &VmConfig) -> Result<()> {
    if vm.is_running() {
        return Err(RoostError::VmRunning {
            name: vm.name.clone(),
        });
    }
    Ok(())
}

/// Check that a name is usable as a single directory component.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| {
        Err(RoostError::InvalidVmName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return invalid("must not be empty");
    }
    if name.len() > MAX_NAME_LEN {
        return invalid("must be at most 64 characters");
    }
    if name.starts_with('.') || name.starts_with('-') {
        return invalid("must start with a letter or digit");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return invalid("may only contain letters, digits, '-', '_' and '.'");
    }
    Ok(())
}
