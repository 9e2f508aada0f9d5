//! List command implementation.
//!
//! The `roost ls` command lists VMs as a table or JSON.

use async_trait::async_trait;
use std::sync::Arc;

use crate::cli::args::{LsArgs, OutputFormat};
use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::{RoostTheme, Table, UserInterface};
use crate::vm::{format_size, VmConfig, VmStore};

use super::dispatcher::{Command, CommandResult};
use super::open_store;

/// The list command implementation.
pub struct ListCommand {
    settings: Arc<SettingsManager>,
    args: LsArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(settings: Arc<SettingsManager>, args: LsArgs) -> Self {
        Self { settings, args }
    }
}

#[async_trait(?Send)]
impl Command for ListCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = open_store(&self.settings).await?;
        let vms = store.list().await?;

        match self.args.format {
            OutputFormat::Json => ui.message(&serde_json::to_string_pretty(&vms)?),
            OutputFormat::Text if vms.is_empty() => ui.message("No virtual machines found"),
            OutputFormat::Text => {
                let location = ui.output_mode().shows_details().then_some(&store);
                ui.message(&render_table(&vms, location, &RoostTheme::detect()));
            }
        }

        Ok(CommandResult::success())
    }
}

/// Render the VM table; passing the store adds a LOCATION column.
fn render_table(vms: &[VmConfig], location: Option<&VmStore>, theme: &RoostTheme) -> String {
    let mut headers = vec!["NAME", "OS", "CPU", "MEMORY", "DISK", "DISPLAY", "STATUS"];
    if location.is_some() {
        headers.push("LOCATION");
    }

    let mut table = Table::new(&headers);
    for vm in vms {
        let mut row = vec![
            vm.name.clone(),
            vm.os.clone(),
            vm.cpu_count.to_string(),
            format_size(vm.memory_size),
            format_size(vm.disk_size),
            vm.display.clone(),
            theme.format_status(vm.status),
        ];
        if let Some(store) = location {
            row.push(store.vm_dir(&vm.name).display().to_string());
        }
        table.add_row(row);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing;
    use crate::ui::MockUI;
    use crate::ui::OutputMode;
    use crate::vm::{CreateOptions, VmStatus};
    use tempfile::TempDir;

    async fn seeded(temp: &TempDir) -> Arc<SettingsManager> {
        let settings = testing::settings(temp);
        let store = VmStore::new(settings.vm_dir().await.unwrap());
        store.create("web", CreateOptions::default()).await.unwrap();
        store.create("db", CreateOptions::default()).await.unwrap();
        store.set_status("web", VmStatus::Running).await.unwrap();
        settings
    }

    #[tokio::test]
    async fn empty_inventory() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ListCommand::new(testing::settings(&temp), LsArgs::default())
            .execute(&mut ui)
            .await
            .unwrap();
        assert_eq!(ui.messages(), ["No virtual machines found"]);
    }

    #[tokio::test]
    async fn json_output_parses() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let args = LsArgs {
            format: OutputFormat::Json,
        };
        ListCommand::new(seeded(&temp).await, args)
            .execute(&mut ui)
            .await
            .unwrap();

        let vms: Vec<VmConfig> = serde_json::from_str(&ui.messages()[0]).unwrap();
        let names: Vec<_> = vms.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["db", "web"]);
        assert_eq!(vms[1].status, VmStatus::Running);
    }

    #[test]
    fn table_has_row_per_vm() {
        let vms = vec![
            VmConfig::new("a", CreateOptions::default()),
            VmConfig::new("b", CreateOptions::default()),
        ];
        let output = render_table(&vms, None, &RoostTheme::plain());
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("a "));
        assert!(lines[2].contains("4GB"));
        assert!(lines[2].ends_with("stopped"));
    }

    #[tokio::test]
    async fn verbose_adds_location_column() {
        let temp = TempDir::new().unwrap();
        let settings = seeded(&temp).await;
        let vm_dir = settings.vm_dir().await.unwrap();

        let mut normal = MockUI::new();
        ListCommand::new(Arc::clone(&settings), LsArgs::default())
            .execute(&mut normal)
            .await
            .unwrap();
        assert!(!normal.messages()[0].contains("LOCATION"));

        let mut verbose = MockUI::with_mode(OutputMode::Verbose);
        ListCommand::new(settings, LsArgs::default())
            .execute(&mut verbose)
            .await
            .unwrap();
        let output = &verbose.messages()[0];
        assert!(output.lines().next().unwrap().ends_with("LOCATION"));
        assert!(output.contains(&vm_dir.join("web").display().to_string()));
    }
}
