//! The startup pipeline.
//!
//! After parsing, every invocation goes through [`Startup::run`]:
//!
//! 1. The settings migration guard runs its one-shot check.
//! 2. A resulting note is logged once and marked emitted.
//! 3. Exactly one command is dispatched.
//!
//! A migration failure ends the invocation before any command starts.

use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::UserInterface;
use crate::vm::Hypervisor;

use super::args::Cli;
use super::commands::{CommandDispatcher, CommandResult};
use super::registry::CommandRegistry;

/// Runs the migration guard, then the selected command.
pub struct Startup {
    settings: Arc<SettingsManager>,
    dispatcher: CommandDispatcher,
}

impl Startup {
    /// Wire the shared settings service and hypervisor into a dispatcher.
    pub fn new(settings: Arc<SettingsManager>, hypervisor: Arc<dyn Hypervisor>) -> Self {
        debug_assert!(
            CommandRegistry::build().validate().is_ok(),
            "command names must be unique per level"
        );
        let dispatcher = CommandDispatcher::new(Arc::clone(&settings), hypervisor);
        Self {
            settings,
            dispatcher,
        }
    }

    /// Run the migration check and log its note at most once.
    pub async fn prepare(&self) -> Result<()> {
        if let Some(note) = self.settings.check_and_migrate().await? {
            info!("{}", note);
            self.settings.mark_deprecation_emitted().await;
        }
        Ok(())
    }

    /// Prepare, then dispatch the parsed command.
    pub async fn run(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        debug_assert!(
            CommandRegistry::build()
                .resolve(&cli.command.path())
                .is_some_and(|node| node.is_leaf()),
            "parsed command must be a registered leaf"
        );
        self.prepare().await?;
        self.dispatcher.dispatch(&cli.command, ui).await
    }
}
