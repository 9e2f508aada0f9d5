//! Error types for roost operations.
//!
//! This module defines [`RoostError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RoostError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `RoostError::Other`) for unexpected errors
//! - Argument errors never reach this type; clap reports them before startup
//! - Every error surfaces once, through the exit translator in `cli::exit`

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for roost operations.
#[derive(Debug, Error)]
pub enum RoostError {
    /// No home directory could be determined for the current user.
    #[error("Unable to determine the home directory for the current user")]
    HomeDirUnavailable,

    /// Failed to parse the settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    SettingsParseError { path: PathBuf, message: String },

    /// Moving the legacy cache directory into place failed.
    #[error("Failed to migrate cache directory from {from} to {to}")]
    Migration {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// VM name is empty or contains characters that can't be a directory name.
    #[error("Invalid VM name '{name}': {reason}")]
    InvalidVmName { name: String, reason: String },

    /// No VM with the given name exists.
    #[error("Virtual machine '{name}' not found")]
    VmNotFound { name: String },

    /// A VM with the given name already exists.
    #[error("Virtual machine '{name}' already exists")]
    VmAlreadyExists { name: String },

    /// The VM is running and the operation needs it stopped.
    #[error("Virtual machine '{name}' is running")]
    VmRunning { name: String },

    /// The VM is stopped and the operation needs it running.
    #[error("Virtual machine '{name}' is not running")]
    VmNotRunning { name: String },

    /// Requested VM settings can't be applied.
    #[error("Invalid settings for '{name}': {message}")]
    InvalidVmSettings { name: String, message: String },

    /// No hypervisor backend can service the request.
    #[error("Hypervisor unavailable: {message}")]
    HypervisorUnavailable { message: String },

    /// The API server could not bind its listener.
    #[error("Failed to bind API server on {addr}")]
    ServerBind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized or deserialized.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for RoostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type alias for roost operations.
pub type Result<T> = std::result::Result<T, RoostError>;
