//! Stop command implementation.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::cli::args::StopArgs;
use crate::error::{Result, RoostError};
use crate::settings::SettingsManager;
use crate::ui::UserInterface;
use crate::vm::{Hypervisor, VmStatus};

use super::dispatcher::{Command, CommandResult};
use super::open_store;

/// The stop command implementation.
pub struct StopCommand {
    settings: Arc<SettingsManager>,
    hypervisor: Arc<dyn Hypervisor>,
    args: StopArgs,
}

impl StopCommand {
    /// Create a new stop command.
    pub fn new(settings: Arc<SettingsManager>, hypervisor: Arc<dyn Hypervisor>, args: StopArgs) -> Self {
        Self {
            settings,
            hypervisor,
            args,
        }
    }
}

#[async_trait(?Send)]
impl Command for StopCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = open_store(&self.settings).await?;
        let vm = store.get(&self.args.name).await?;
        if !vm.is_running() {
            return Err(RoostError::VmNotRunning { name: vm.name });
        }

        info!(vm = %vm.name, backend = self.hypervisor.name(), "Stopping VM");
        self.hypervisor.stop(&vm, &store.vm_dir(&vm.name)).await?;
        store.set_status(&vm.name, VmStatus::Stopped).await?;

        ui.success(&format!("Stopped VM {}", vm.name));
        Ok(CommandResult::success())
    }
}
