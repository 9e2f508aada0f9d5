//! Set command implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::cli::args::SetArgs;
use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::UserInterface;
use crate::vm::format_size;

use super::dispatcher::{Command, CommandResult};
use super::open_store;

/// The set command implementation.
pub struct SetCommand {
    settings: Arc<SettingsManager>,
    args: SetArgs,
}

impl SetCommand {
    /// Create a new set command.
    pub fn new(settings: Arc<SettingsManager>, args: SetArgs) -> Self {
        Self { settings, args }
    }
}

#[async_trait(?Send)]
impl Command for SetCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let update = self.args.update();
        if update.is_empty() {
            ui.warning("Nothing to change. Pass --cpu, --memory, --disk-size or --display.");
            return Ok(CommandResult::failure(2));
        }

        let vm = open_store(&self.settings)
            .await?
            .update(&self.args.name, &update)
            .await?;

        ui.success(&format!(
            "Updated VM {} ({} CPUs, {} memory, {} disk, {})",
            vm.name,
            vm.cpu_count,
            format_size(vm.memory_size),
            format_size(vm.disk_size),
            vm.display
        ));
        Ok(CommandResult::success())
    }
}
