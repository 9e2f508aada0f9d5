//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::prompts::prompt_confirm;
use super::{OutputMode, RoostTheme, UserInterface};

/// Terminal UI writing results to stdout and errors to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: RoostTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: RoostTheme::detect(),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        if !self.is_interactive() {
            return Ok(default);
        }
        prompt_confirm(question, default, &self.err)
    }

    fn is_interactive(&self) -> bool {
        self.out.is_term() && self.err.is_term()
    }
}
