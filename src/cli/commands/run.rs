//! Run command implementation.
//!
//! The `roost run` command hands a stopped VM to the hypervisor and records
//! it as running once the backend accepts it.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::cli::args::RunArgs;
use crate::error::{Result, RoostError};
use crate::settings::SettingsManager;
use crate::ui::UserInterface;
use crate::vm::{Hypervisor, VmStatus};

use super::dispatcher::{Command, CommandResult};
use super::open_store;

/// The run command implementation.
pub struct RunCommand {
    settings: Arc<SettingsManager>,
    hypervisor: Arc<dyn Hypervisor>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(settings: Arc<SettingsManager>, hypervisor: Arc<dyn Hypervisor>, args: RunArgs) -> Self {
        Self {
            settings,
            hypervisor,
            args,
        }
    }
}

#[async_trait(?Send)]
impl Command for RunCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = open_store(&self.settings).await?;
        let vm = store.get(&self.args.name).await?;
        if vm.is_running() {
            return Err(RoostError::VmRunning { name: vm.name });
        }

        info!(vm = %vm.name, backend = self.hypervisor.name(), "Starting VM");
        self.hypervisor.start(&vm, &store.vm_dir(&vm.name)).await?;
        store.set_status(&vm.name, VmStatus::Running).await?;

        ui.success(&format!("Started VM {}", vm.name));
        Ok(CommandResult::success())
    }
}
