//! Delete command implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::cli::args::DeleteArgs;
use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::open_store;

/// The delete command implementation.
pub struct DeleteCommand {
    settings: Arc<SettingsManager>,
    args: DeleteArgs,
}

impl DeleteCommand {
    /// Create a new delete command.
    pub fn new(settings: Arc<SettingsManager>, args: DeleteArgs) -> Self {
        Self { settings, args }
    }
}

#[async_trait(?Send)]
impl Command for DeleteCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = open_store(&self.settings).await?;
        // Fail on a missing VM before asking anything.
        let vm = store.get(&self.args.name).await?;

        if !self.args.force && ui.is_interactive() {
            let question = format!("Delete VM {} and all of its files?", vm.name);
            if !ui.confirm(&question, false)? {
                ui.message("Cancelled.");
                return Ok(CommandResult::success());
            }
        }

        store.delete(&vm.name).await?;
        ui.success(&format!("Deleted VM {}", vm.name));
        Ok(CommandResult::success())
    }
}
