//! VM records stored as `config.json` in each VM directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, RoostError};

use super::size::format_size;

/// Whether a VM is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VmStatus {
    Stopped,
    Running,
}

impl fmt::Display for VmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// A persisted VM definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmConfig {
    pub name: String,
    pub os: String,
    pub cpu_count: u32,
    /// Memory in bytes.
    pub memory_size: u64,
    /// Disk size in bytes.
    pub disk_size: u64,
    /// Display resolution as `WIDTHxHEIGHT`.
    pub display: String,
    pub status: VmStatus,
    pub created_at: DateTime<Utc>,
}

/// Settings for a new VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    pub os: String,
    pub cpu_count: u32,
    pub memory_size: u64,
    pub disk_size: u64,
    pub display: String,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            os: "linux".to_string(),
            cpu_count: 4,
            memory_size: 4 << 30,
            disk_size: 50 << 30,
            display: "1024x768".to_string(),
        }
    }
}

/// Changes applied by `roost set`. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VmUpdate {
    pub cpu_count: Option<u32>,
    pub memory_size: Option<u64>,
    pub disk_size: Option<u64>,
    pub display: Option<String>,
}

impl VmUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.cpu_count.is_none()
            && self.memory_size.is_none()
            && self.disk_size.is_none()
            && self.display.is_none()
    }
}

impl VmConfig {
    /// Build a stopped VM record.
    pub fn new(name: &str, options: CreateOptions) -> Self {
        Self {
            name: name.to_string(),
            os: options.os,
            cpu_count: options.cpu_count,
            memory_size: options.memory_size,
            disk_size: options.disk_size,
            display: options.display,
            status: VmStatus::Stopped,
            created_at: Utc::now(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == VmStatus::Running
    }

    /// Apply an update. Disks only grow.
    pub fn apply(&mut self, update: &VmUpdate) -> Result<()> {
        if let Some(disk) = update.disk_size {
            if disk < self.disk_size {
                return Err(RoostError::InvalidVmSettings {
                    name: self.name.clone(),
                    message: format!(
                        "disk size can't shrink from {} to {}",
                        format_size(self.disk_size),
                        format_size(disk)
                    ),
                });
            }
            self.disk_size = disk;
        }
        if let Some(cpu) = update.cpu_count {
            self.cpu_count = cpu;
        }
        if let Some(memory) = update.memory_size {
            self.memory_size = memory;
        }
        if let Some(display) = &update.display {
            self.display = display.clone();
        }
        Ok(())
    }
}

/// Validate a `WIDTHxHEIGHT` display string. Used as a clap value parser.
pub fn parse_display(raw: &str) -> std::result::Result<String, String> {
    let invalid = || format!("invalid display '{}': expected WIDTHxHEIGHT, e.g. 1024x768", raw);

    let (width, height) = raw.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let height: u32 = height.trim().parse().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok(format!("{}x{}", width, height))
}
