//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::cli::args::Commands;
use crate::error::Result;
use crate::settings::SettingsManager;
use crate::ui::UserInterface;
use crate::vm::Hypervisor;

/// Trait for command implementations.
///
/// Every subcommand returns a future from `execute`. Commands that never
/// wait on I/O complete on first poll, so the dispatcher treats all of them
/// the same way.
#[async_trait(?Send)]
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    settings: Arc<SettingsManager>,
    hypervisor: Arc<dyn Hypervisor>,
}

impl CommandDispatcher {
    /// Create a dispatcher handing `settings` and `hypervisor` to commands.
    pub fn new(settings: Arc<SettingsManager>, hypervisor: Arc<dyn Hypervisor>) -> Self {
        Self {
            settings,
            hypervisor,
        }
    }

    /// Build the command implementation for a parsed subcommand.
    pub fn build(&self, command: &Commands) -> Box<dyn Command> {
        let settings = Arc::clone(&self.settings);
        let hypervisor = Arc::clone(&self.hypervisor);

        match command {
            Commands::Create(args) => Box::new(super::create::CreateCommand::new(settings, args.clone())),
            Commands::Ls(args) => Box::new(super::list::ListCommand::new(settings, args.clone())),
            Commands::Get(args) => Box::new(super::get::GetCommand::new(settings, args.clone())),
            Commands::Set(args) => Box::new(super::set::SetCommand::new(settings, args.clone())),
            Commands::Clone(args) => Box::new(super::clone::CloneCommand::new(settings, args.clone())),
            Commands::Delete(args) => Box::new(super::delete::DeleteCommand::new(settings, args.clone())),
            Commands::Run(args) => Box::new(super::run::RunCommand::new(settings, hypervisor, args.clone())),
            Commands::Stop(args) => Box::new(super::stop::StopCommand::new(settings, hypervisor, args.clone())),
            Commands::Images(args) => Box::new(super::images::ImagesCommand::new(settings, args.clone())),
            Commands::Prune(args) => Box::new(super::prune::PruneCommand::new(settings, args.clone())),
            Commands::Serve(args) => Box::new(super::serve::ServeCommand::new(settings, args.clone())),
            Commands::Config(args) => Box::new(super::config::ConfigCommand::new(settings, args.clone())),
            Commands::Completions(args) => Box::new(super::completions::CompletionsCommand::new(args.clone())),
        }
    }

    /// Dispatch and execute a command.
    ///
    /// Exactly one command runs. Its result, error or not, is returned as is.
    pub async fn dispatch(&self, command: &Commands, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        debug!(command = %command.path().join(" "), "Dispatching command");
        self.build(command).execute(ui).await
    }
}
