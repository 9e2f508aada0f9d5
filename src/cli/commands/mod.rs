//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands receive the shared
//! [`SettingsManager`](crate::settings::SettingsManager) (and the hypervisor
//! backend where needed) at construction.

pub mod clone;
pub mod completions;
pub mod config;
pub mod create;
pub mod delete;
pub mod dispatcher;
pub mod get;
pub mod images;
pub mod list;
pub mod prune;
pub mod run;
pub mod serve;
pub mod set;
pub mod stop;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use crate::error::Result;
use crate::settings::SettingsManager;
use crate::vm::VmStore;

/// Open the VM store at the configured storage directory.
pub(crate) async fn open_store(settings: &SettingsManager) -> Result<VmStore> {
    Ok(VmStore::new(settings.vm_dir().await?))
}
