//! Get command implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::cli::args::{GetArgs, OutputFormat};
use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::{RoostTheme, UserInterface};
use crate::vm::{format_size, VmConfig};

use super::dispatcher::{Command, CommandResult};
use super::open_store;

/// The get command implementation.
pub struct GetCommand {
    settings: Arc<SettingsManager>,
    args: GetArgs,
}

impl GetCommand {
    /// Create a new get command.
    pub fn new(settings: Arc<SettingsManager>, args: GetArgs) -> Self {
        Self { settings, args }
    }
}

#[async_trait(?Send)]
impl Command for GetCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = open_store(&self.settings).await?;
        let vm = store.get(&self.args.name).await?;

        match self.args.format {
            OutputFormat::Json => ui.message(&serde_json::to_string_pretty(&vm)?),
            OutputFormat::Text => {
                for line in describe(&vm, &RoostTheme::detect()) {
                    ui.message(&line);
                }
                ui.message(&format!("location: {}", store.vm_dir(&vm.name).display()));
            }
        }

        Ok(CommandResult::success())
    }
}

fn describe(vm: &VmConfig, theme: &RoostTheme) -> Vec<String> {
    let fields = [
        ("name", vm.name.clone()),
        ("os", vm.os.clone()),
        ("cpu", vm.cpu_count.to_string()),
        ("memory", format_size(vm.memory_size)),
        ("disk", format_size(vm.disk_size)),
        ("display", vm.display.clone()),
        ("status", theme.format_status(vm.status)),
        ("created", vm.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
    ];
    fields
        .iter()
        .map(|(key, value)| theme.format_field(key, value, 7))
        .collect()
}
