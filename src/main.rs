//! roost CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use roost::cli::{exit, Cli, Startup};
use roost::settings::SettingsManager;
use roost::ui::{OutputMode, TerminalUI};
use roost::vm::UnavailableHypervisor;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("roost=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roost=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse failures, help and version exit here, before any migration.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return ExitCode::from(exit::report_parse_error(&e)),
    };

    init_tracing(cli.debug);
    tracing::debug!("roost starting with args: {:?}", cli);

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let mut ui = TerminalUI::new(OutputMode::from_flags(cli.quiet, cli.verbose));

    let settings = match SettingsManager::discover() {
        Ok(settings) => Arc::new(settings),
        Err(e) => return ExitCode::from(exit::report(Err(e), &mut ui)),
    };

    let startup = Startup::new(settings, Arc::new(UnavailableHypervisor));
    let result = startup.run(&cli, &mut ui).await;
    ExitCode::from(exit::report(result, &mut ui))
}
