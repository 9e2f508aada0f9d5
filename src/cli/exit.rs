//! Turning outcomes into exit statuses.
//!
//! This is the only place that reports failures to the user. Commands and the
//! startup pipeline return errors unchanged; they are printed here once.

use std::error::Error as _;

use crate::error::{Result, RoostError};
use crate::ui::UserInterface;

use super::commands::CommandResult;

/// Exit status for any propagated error.
pub const FAILURE: u8 = 1;

/// Report the outcome of a run and pick the exit status.
pub fn report(result: Result<CommandResult>, ui: &mut dyn UserInterface) -> u8 {
    match result {
        Ok(result) => result.exit_code,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            for line in describe(&e) {
                ui.error(&line);
            }
            FAILURE
        }
    }
}

/// Print a clap parse outcome and return clap's exit status.
///
/// Help and version land here too and exit 0.
pub fn report_parse_error(err: &clap::Error) -> u8 {
    let _ = err.print();
    u8::try_from(err.exit_code()).unwrap_or(FAILURE)
}

/// Diagnostic lines for an error: the error, then each distinct cause.
pub fn describe(err: &RoostError) -> Vec<String> {
    let mut lines = vec![format!("Error: {}", err)];
    let mut previous = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !previous.contains(&text) {
            lines.push(format!("  caused by: {}", text));
        }
        previous = text;
        source = cause.source();
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::io;

    #[test]
    fn success_uses_command_exit_code() {
        let mut ui = MockUI::new();
        assert_eq!(report(Ok(CommandResult::success()), &mut ui), 0);
        assert_eq!(report(Ok(CommandResult::failure(2)), &mut ui), 2);
        assert!(ui.errors().is_empty());
    }

    #[test]
    fn error_is_reported_once_and_fails() {
        let mut ui = MockUI::new();
        let code = report(Err(RoostError::VmNotFound { name: "dev".into() }), &mut ui);

        assert_eq!(code, FAILURE);
        assert_eq!(ui.errors(), ["Error: Virtual machine 'dev' not found"]);
    }

    #[test]
    fn describe_includes_causes() {
        let err = RoostError::Migration {
            from: "/old".into(),
            to: "/new".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let lines = describe(&err);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Error: Failed to migrate cache directory"));
        assert_eq!(lines[1], "  caused by: permission denied");
    }

    #[test]
    fn describe_skips_repeated_cause() {
        let err = RoostError::Io(io::Error::other("disk full"));
        assert_eq!(describe(&err), ["Error: IO error: disk full"]);
    }

    #[test]
    fn parse_errors_keep_clap_status() {
        let usage = Cli::try_parse_from(["roost", "teleport"]).unwrap_err();
        assert_eq!(usage.exit_code(), 2);

        let help = Cli::try_parse_from(["roost", "--help"]).unwrap_err();
        assert_eq!(help.exit_code(), 0);
    }
}
