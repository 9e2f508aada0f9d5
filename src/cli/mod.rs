//! Command-line interface for roost.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`registry`] - Read-only command tree derived from the definitions
//! - [`commands`] - Command implementations and the dispatcher
//! - [`startup`] - Migration guard, then dispatch
//! - [`exit`] - Error reporting and exit statuses

pub mod args;
pub mod commands;
pub mod exit;
pub mod registry;
pub mod startup;

pub use args::{Cli, Commands, OutputFormat};
pub use commands::config::ConfigArgs;
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use registry::{CommandNode, CommandRegistry};
pub use startup::Startup;
