//! Local VM inventory and the hypervisor seam.
//!
//! - [`config`] - VM records and updates
//! - [`store`] - Directory-per-VM storage
//! - [`hypervisor`] - Backend trait for booting guests
//! - [`images`] - Cached images under the cache directory
//! - [`size`] - Byte size parsing and formatting

pub mod config;
pub mod hypervisor;
pub mod images;
pub mod size;
pub mod store;

pub use config::{parse_display, CreateOptions, VmConfig, VmStatus, VmUpdate};
pub use hypervisor::{Hypervisor, UnavailableHypervisor};
pub use images::{CachedImage, ImageCache, PruneReport};
pub use size::{format_size, parse_size};
pub use store::{validate_name, VmStore};
