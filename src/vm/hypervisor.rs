//! The hypervisor seam.
//!
//! `run` and `stop` hand VMs to a [`Hypervisor`]. Booting guests, disk images
//! and networking live behind this trait and are not part of this crate.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{Result, RoostError};

use super::config::VmConfig;

/// Backend that actually boots and halts guests.
#[async_trait]
pub trait Hypervisor: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Boot the VM described by `vm`, whose files live in `vm_dir`.
    async fn start(&self, vm: &VmConfig, vm_dir: &Path) -> Result<()>;

    /// Halt a running VM.
    async fn stop(&self, vm: &VmConfig, vm_dir: &Path) -> Result<()>;
}

/// Backend used when no hypervisor is available on this host.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableHypervisor;

impl UnavailableHypervisor {
    fn error(&self, vm: &VmConfig) -> RoostError {
        RoostError::HypervisorUnavailable {
            message: format!(
                "no hypervisor backend is available on {} to manage '{}'",
                std::env::consts::OS,
                vm.name
            ),
        }
    }
}

#[async_trait]
impl Hypervisor for UnavailableHypervisor {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn start(&self, vm: &VmConfig, _vm_dir: &Path) -> Result<()> {
        Err(self.error(vm))
    }

    async fn stop(&self, vm: &VmConfig, _vm_dir: &Path) -> Result<()> {
        Err(self.error(vm))
    }
}
