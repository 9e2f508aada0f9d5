//! roost - build, run and manage local virtual machines.
//!
//! roost is a CLI and local API server over an on-disk VM inventory. Every
//! invocation runs the same pipeline: parse arguments, run the one-shot
//! cache directory migration, dispatch exactly one command, translate the
//! outcome into an exit status.
//!
//! # Modules
//!
//! - [`cli`] - Argument parsing, command registry, dispatch and exit handling
//! - [`error`] - Error types and result aliases
//! - [`server`] - Local read-only HTTP API
//! - [`settings`] - Settings file, resolved paths and the cache migration guard
//! - [`sys`] - Async filesystem helpers
//! - [`ui`] - Terminal output, tables and prompts
//! - [`vm`] - VM records, image cache and the hypervisor seam
//!
//! # Example
//!
//! ```
//! use roost::vm::{format_size, parse_size};
//!
//! let bytes = parse_size("8GB").unwrap();
//! assert_eq!(format_size(bytes), "8GB");
//! ```

pub mod cli;
pub mod error;
pub mod server;
pub mod settings;
pub mod sys;
pub mod ui;
pub mod vm;

pub use error::{Result, RoostError};
