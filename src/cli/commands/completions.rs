//! Shell completions generation.
//!
//! The `roost completions` command generates shell completion scripts.

use async_trait::async_trait;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

#[async_trait(?Send)]
impl Command for CompletionsCommand {
    async fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut stdout = std::io::stdout();
        write_completions(self.args.shell, &mut stdout);
        stdout.flush()?;
        Ok(CommandResult::success())
    }
}

/// Write the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "roost", out);
}
