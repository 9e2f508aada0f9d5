//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Results, status messages and extra detail.
    Verbose,
    /// Show results and status messages.
    #[default]
    Normal,
    /// Show results only; status messages are dropped.
    Quiet,
}

impl OutputMode {
    /// Build the mode from the global `--quiet`/`--verbose` flags.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows status messages (success/warning lines).
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode adds detail to command output.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
