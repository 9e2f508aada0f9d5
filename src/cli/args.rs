//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::vm::{parse_display, parse_size, CreateOptions, VmUpdate};

use super::commands::config::ConfigArgs;

/// A lightweight CLI and local API server to build, run and manage virtual machines.
#[derive(Debug, Parser)]
#[command(name = "roost")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Print help
    #[arg(long, global = true, action = clap::ArgAction::Help)]
    pub help: Option<bool>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Only print results; drop status messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show extra detail, such as where each VM is stored
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands, in registry order.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new virtual machine
    Create(CreateArgs),

    /// List virtual machines
    #[command(visible_alias = "list")]
    Ls(LsArgs),

    /// Show a virtual machine's configuration
    Get(GetArgs),

    /// Change a stopped virtual machine's resources
    Set(SetArgs),

    /// Copy a stopped virtual machine under a new name
    Clone(CloneArgs),

    /// Delete a virtual machine
    Delete(DeleteArgs),

    /// Start a virtual machine
    Run(RunArgs),

    /// Stop a running virtual machine
    Stop(StopArgs),

    /// List cached images
    Images(ImagesArgs),

    /// Remove cached images
    Prune(PruneArgs),

    /// Start the local API server
    Serve(ServeArgs),

    /// Inspect and change settings
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Commands {
    /// The subcommand path this value was parsed from, e.g. `["config", "cache", "set"]`.
    pub fn path(&self) -> Vec<&'static str> {
        match self {
            Self::Create(_) => vec!["create"],
            Self::Ls(_) => vec!["ls"],
            Self::Get(_) => vec!["get"],
            Self::Set(_) => vec!["set"],
            Self::Clone(_) => vec!["clone"],
            Self::Delete(_) => vec!["delete"],
            Self::Run(_) => vec!["run"],
            Self::Stop(_) => vec!["stop"],
            Self::Images(_) => vec!["images"],
            Self::Prune(_) => vec!["prune"],
            Self::Serve(_) => vec!["serve"],
            Self::Config(args) => {
                let mut path = vec!["config"];
                path.extend(args.command.path());
                path
            }
            Self::Completions(_) => vec!["completions"],
        }
    }
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the `create` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CreateArgs {
    /// Name of the virtual machine
    pub name: String,

    /// Guest operating system
    #[arg(long, default_value = "linux")]
    pub os: String,

    /// Number of CPU cores
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=256))]
    pub cpu: u32,

    /// Memory size, e.g. 8GB
    #[arg(long, default_value = "4GB", value_parser = parse_size)]
    pub memory: u64,

    /// Disk size, e.g. 100GB
    #[arg(long, default_value = "50GB", value_parser = parse_size)]
    pub disk_size: u64,

    /// Display resolution, e.g. 1920x1080
    #[arg(long, default_value = "1024x768", value_parser = parse_display)]
    pub display: String,
}

impl CreateArgs {
    /// Settings for the new VM.
    pub fn options(&self) -> CreateOptions {
        CreateOptions {
            os: self.os.clone(),
            cpu_count: self.cpu,
            memory_size: self.memory,
            disk_size: self.disk_size,
            display: self.display.clone(),
        }
    }
}

/// Arguments for the `ls` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, clap::Args)]
pub struct GetArgs {
    /// Name of the virtual machine
    pub name: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments for the `set` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SetArgs {
    /// Name of the virtual machine
    pub name: String,

    /// New number of CPU cores
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=256))]
    pub cpu: Option<u32>,

    /// New memory size, e.g. 8GB
    #[arg(long, value_parser = parse_size)]
    pub memory: Option<u64>,

    /// New disk size (can only grow)
    #[arg(long, value_parser = parse_size)]
    pub disk_size: Option<u64>,

    /// New display resolution
    #[arg(long, value_parser = parse_display)]
    pub display: Option<String>,
}

impl SetArgs {
    /// The requested changes.
    pub fn update(&self) -> VmUpdate {
        VmUpdate {
            cpu_count: self.cpu,
            memory_size: self.memory,
            disk_size: self.disk_size,
            display: self.display.clone(),
        }
    }
}

/// Arguments for the `clone` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CloneArgs {
    /// Virtual machine to copy
    pub name: String,

    /// Name for the copy
    pub new_name: String,
}

/// Arguments for the `delete` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DeleteArgs {
    /// Name of the virtual machine
    pub name: String,

    /// Don't prompt for confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Name of the virtual machine
    pub name: String,
}

/// Arguments for the `stop` command.
#[derive(Debug, Clone, clap::Args)]
pub struct StopArgs {
    /// Name of the virtual machine
    pub name: String,
}

/// Arguments for the `images` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ImagesArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Arguments for the `prune` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PruneArgs {
    /// Don't prompt for confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `serve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 7777)]
    pub port: u16,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_with_sizes() {
        let cli = Cli::parse_from([
            "roost", "create", "dev", "--cpu", "8", "--memory", "16GB", "--disk-size", "100GB",
        ]);
        let Commands::Create(args) = cli.command else {
            panic!("Expected Create command");
        };
        let options = args.options();
        assert_eq!(options.cpu_count, 8);
        assert_eq!(options.memory_size, 16 << 30);
        assert_eq!(options.disk_size, 100 << 30);
        assert_eq!(options.display, "1024x768");
    }

    #[test]
    fn rejects_bad_size() {
        let err = Cli::try_parse_from(["roost", "create", "dev", "--memory", "lots"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_zero_cpus() {
        assert!(Cli::try_parse_from(["roost", "create", "dev", "--cpu", "0"]).is_err());
    }

    #[test]
    fn missing_name_is_error() {
        let err = Cli::try_parse_from(["roost", "get"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn help_is_long_form_only() {
        let err = Cli::try_parse_from(["roost", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["roost", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
        assert_eq!(err.exit_code(), 2);

        let err = Cli::try_parse_from(["roost", "ls", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["roost"]).is_err());
    }

    #[test]
    fn unknown_subcommand_is_error() {
        let err = Cli::try_parse_from(["roost", "teleport"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn help_and_version_are_early_exits() {
        let help = Cli::try_parse_from(["roost", "--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(help.exit_code(), 0);

        let version = Cli::try_parse_from(["roost", "--version"]).unwrap_err();
        assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);
        assert_eq!(version.exit_code(), 0);
    }

    #[test]
    fn set_collects_update() {
        let cli = Cli::parse_from(["roost", "set", "dev", "--cpu", "2", "--display", "800x600"]);
        let Commands::Set(args) = cli.command else {
            panic!("Expected Set command");
        };
        let update = args.update();
        assert_eq!(update.cpu_count, Some(2));
        assert_eq!(update.display.as_deref(), Some("800x600"));
        assert!(update.memory_size.is_none());
    }

    #[test]
    fn ls_alias_and_format() {
        let cli = Cli::parse_from(["roost", "list", "--format", "json"]);
        let Commands::Ls(args) = cli.command else {
            panic!("Expected Ls command");
        };
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["roost", "ls", "--quiet", "--debug"]);
        assert!(cli.quiet);
        assert!(cli.debug);
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::parse_from(["roost", "serve"]);
        let Commands::Serve(args) = cli.command else {
            panic!("Expected Serve command");
        };
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 7777);
    }

    #[test]
    fn paths_name_deepest_subcommand() {
        let cases: &[(&[&str], &[&str])] = &[
            (&["roost", "create", "dev"], &["create"]),
            (&["roost", "list"], &["ls"]),
            (&["roost", "run", "dev"], &["run"]),
            (&["roost", "config", "get"], &["config", "get"]),
            (&["roost", "config", "cache", "set", "/tmp/c"], &["config", "cache", "set"]),
            (&["roost", "config", "caching", "set", "false"], &["config", "caching", "set"]),
            (&["roost", "completions", "bash"], &["completions"]),
        ];
        for (argv, expected) in cases {
            let cli = Cli::parse_from(*argv);
            assert_eq!(cli.command.path(), *expected, "argv: {:?}", argv);
        }
    }
}
