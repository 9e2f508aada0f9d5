//! Config command implementation.
//!
//! Provides `roost config get`, `roost config cache get|set` and
//! `roost config caching get|set`.

use async_trait::async_trait;
use clap::{Args, Subcommand};
use std::sync::Arc;

use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::{RoostTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Arguments for the config command.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

/// Config subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigSubcommand {
    /// Show all settings
    Get,
    /// Manage the image cache location
    Cache {
        #[command(subcommand)]
        command: CacheSubcommand,
    },
    /// Turn image caching on or off
    Caching {
        #[command(subcommand)]
        command: CachingSubcommand,
    },
}

/// `config cache` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Show the cache directory
    Get,
    /// Set the cache directory
    Set {
        /// New cache directory (`~` is expanded)
        path: String,
    },
}

/// `config caching` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CachingSubcommand {
    /// Show whether caching is enabled
    Get,
    /// Enable or disable caching
    Set {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

impl ConfigSubcommand {
    /// Path below `config`.
    pub fn path(&self) -> Vec<&'static str> {
        match self {
            Self::Get => vec!["get"],
            Self::Cache { command } => match command {
                CacheSubcommand::Get => vec!["cache", "get"],
                CacheSubcommand::Set { .. } => vec!["cache", "set"],
            },
            Self::Caching { command } => match command {
                CachingSubcommand::Get => vec!["caching", "get"],
                CachingSubcommand::Set { .. } => vec!["caching", "set"],
            },
        }
    }
}

/// The config command implementation.
pub struct ConfigCommand {
    settings: Arc<SettingsManager>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(settings: Arc<SettingsManager>, args: ConfigArgs) -> Self {
        Self { settings, args }
    }
}

#[async_trait(?Send)]
impl Command for ConfigCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.command {
            ConfigSubcommand::Get => show_all(&self.settings, ui).await?,
            ConfigSubcommand::Cache { command } => match command {
                CacheSubcommand::Get => {
                    let dir = self.settings.cache_dir().await?;
                    ui.message(&dir.display().to_string());
                }
                CacheSubcommand::Set { path } => {
                    let dir = self.settings.set_cache_directory(path).await?;
                    ui.success(&format!("Cache directory set to {}", dir.display()));
                }
            },
            ConfigSubcommand::Caching { command } => match command {
                CachingSubcommand::Get => {
                    let settings = self.settings.load().await?;
                    ui.message(&settings.caching_enabled.to_string());
                }
                CachingSubcommand::Set { enabled } => {
                    self.settings.set_caching_enabled(*enabled).await?;
                    let state = if *enabled { "enabled" } else { "disabled" };
                    ui.success(&format!("Image caching {}", state));
                }
            },
        }

        Ok(CommandResult::success())
    }
}

async fn show_all(manager: &SettingsManager, ui: &mut dyn UserInterface) -> Result<()> {
    let settings = manager.load().await?;
    let paths = manager.paths();
    let theme = RoostTheme::detect();
    let width = "caching_enabled".len();

    ui.message(&theme.format_field(
        "settings_file",
        &paths.settings_file().display().to_string(),
        width,
    ));
    ui.message(&theme.format_field(
        "home_directory",
        &settings.vm_dir(paths).display().to_string(),
        width,
    ));
    ui.message(&theme.format_field(
        "cache_directory",
        &settings.cache_dir(paths).display().to_string(),
        width,
    ));
    ui.message(&theme.format_field(
        "caching_enabled",
        &settings.caching_enabled.to_string(),
        width,
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::settings;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    async fn run(settings: &Arc<SettingsManager>, command: ConfigSubcommand) -> MockUI {
        let mut ui = MockUI::new();
        ConfigCommand::new(Arc::clone(settings), ConfigArgs { command })
            .execute(&mut ui)
            .await
            .unwrap();
        ui
    }

    #[tokio::test]
    async fn get_lists_every_setting() {
        let temp = TempDir::new().unwrap();
        let ui = run(&settings(&temp), ConfigSubcommand::Get).await;

        let output = ui.messages().join("\n");
        assert!(output.contains("settings_file"));
        assert!(output.contains("home_directory"));
        assert!(output.contains("cache_directory"));
        assert!(output.contains("caching_enabled"));
        assert!(ui.messages()[3].ends_with("true"));
    }

    #[tokio::test]
    async fn cache_set_then_get() {
        let temp = TempDir::new().unwrap();
        let s = settings(&temp);
        let target = temp.path().join("images");

        let ui = run(
            &s,
            ConfigSubcommand::Cache {
                command: CacheSubcommand::Set {
                    path: target.display().to_string(),
                },
            },
        )
        .await;
        assert!(ui.successes()[0].contains("Cache directory set"));

        let ui = run(
            &s,
            ConfigSubcommand::Cache {
                command: CacheSubcommand::Get,
            },
        )
        .await;
        assert_eq!(ui.messages(), [target.display().to_string()]);
    }

    #[tokio::test]
    async fn caching_toggle() {
        let temp = TempDir::new().unwrap();
        let s = settings(&temp);

        run(
            &s,
            ConfigSubcommand::Caching {
                command: CachingSubcommand::Set { enabled: false },
            },
        )
        .await;

        let ui = run(
            &s,
            ConfigSubcommand::Caching {
                command: CachingSubcommand::Get,
            },
        )
        .await;
        assert_eq!(ui.messages(), ["false"]);
    }
}
