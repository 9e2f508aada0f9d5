//! Create command implementation.
//!
//! The `roost create` command records a new VM.

use async_trait::async_trait;
use std::sync::Arc;

use crate::cli::args::CreateArgs;
use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::UserInterface;
use crate::vm::format_size;

use super::dispatcher::{Command, CommandResult};
use super::open_store;

/// The create command implementation.
pub struct CreateCommand {
    settings: Arc<SettingsManager>,
    args: CreateArgs,
}

impl CreateCommand {
    /// Create a new create command.
    pub fn new(settings: Arc<SettingsManager>, args: CreateArgs) -> Self {
        Self { settings, args }
    }
}

#[async_trait(?Send)]
impl Command for CreateCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = open_store(&self.settings).await?;
        let vm = store.create(&self.args.name, self.args.options()).await?;

        ui.success(&format!(
            "Created VM {} ({} CPUs, {} memory, {} disk, {})",
            vm.name,
            vm.cpu_count,
            format_size(vm.memory_size),
            format_size(vm.disk_size),
            vm.os
        ));
        Ok(CommandResult::success())
    }
}
