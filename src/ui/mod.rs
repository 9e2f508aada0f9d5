//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal usage
//! - [`MockUI`] capturing output for tests
//! - [`Table`] and [`RoostTheme`] for formatting
//!
//! # Example
//!
//! ```
//! use roost::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("Created VM dev");
//! assert_eq!(ui.successes(), ["Created VM dev"]);
//! ```

pub mod mock;
pub mod output;
pub mod prompts;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, RoostTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// Commands write through this trait so tests can capture output.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Print command output (always shown, stdout).
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message (stderr, never suppressed).
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question. Non-interactive sessions get `default`.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}
