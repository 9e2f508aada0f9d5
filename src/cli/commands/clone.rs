//! Clone command implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::cli::args::CloneArgs;
use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::open_store;

/// The clone command implementation.
pub struct CloneCommand {
    settings: Arc<SettingsManager>,
    args: CloneArgs,
}

impl CloneCommand {
    /// Create a new clone command.
    pub fn new(settings: Arc<SettingsManager>, args: CloneArgs) -> Self {
        Self { settings, args }
    }
}

#[async_trait(?Send)]
impl Command for CloneCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = open_store(&self.settings).await?;
        let vm = store.clone_vm(&self.args.name, &self.args.new_name).await?;

        ui.success(&format!("Cloned VM {} to {}", self.args.name, vm.name));
        Ok(CommandResult::success())
    }
}
