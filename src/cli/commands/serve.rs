//! Serve command implementation.
//!
//! The `roost serve` command runs the local API server in the foreground.

use async_trait::async_trait;
use std::sync::Arc;

use crate::cli::args::ServeArgs;
use crate::error::Result;
use crate::server::{self, ServerConfig};
use crate::settings::SettingsManager;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The serve command implementation.
pub struct ServeCommand {
    settings: Arc<SettingsManager>,
    args: ServeArgs,
}

impl ServeCommand {
    /// Create a new serve command.
    pub fn new(settings: Arc<SettingsManager>, args: ServeArgs) -> Self {
        Self { settings, args }
    }

    fn config(&self) -> ServerConfig {
        ServerConfig {
            host: self.args.host.clone(),
            port: self.args.port,
        }
    }
}

#[async_trait(?Send)]
impl Command for ServeCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let listener = server::bind(&self.config()).await?;
        let addr = listener.local_addr()?;
        ui.success(&format!("Serving the roost API on http://{}", addr));
        server::serve(listener, Arc::clone(&self.settings)).await?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing;
    use crate::ui::MockUI;
    use crate::RoostError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn bind_error_propagates() {
        let temp = TempDir::new().unwrap();
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let args = ServeArgs {
            host: "127.0.0.1".into(),
            port: taken.local_addr().unwrap().port(),
        };
        let mut ui = MockUI::new();

        let err = ServeCommand::new(testing::settings(&temp), args)
            .execute(&mut ui)
            .await
            .unwrap_err();
        assert!(matches!(err, RoostError::ServerBind { .. }));
        assert!(ui.successes().is_empty());
    }
}
