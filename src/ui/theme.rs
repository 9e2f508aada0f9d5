//! Visual theme and styling.

use console::Style;

use crate::vm::VmStatus;

/// roost's visual theme.
#[derive(Debug, Clone)]
pub struct RoostTheme {
    /// Success messages (green).
    pub success: Style,
    /// Warnings (yellow).
    pub warning: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Running VMs (green bold).
    pub running: Style,
    /// Secondary text.
    pub dim: Style,
    /// Key labels in key-value output (bold).
    pub key: Style,
}

impl Default for RoostTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl RoostTheme {
    /// Colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            running: Style::new().green().bold(),
            dim: Style::new().dim(),
            key: Style::new().bold(),
        }
    }

    /// Theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            running: Style::new(),
            dim: Style::new(),
            key: Style::new(),
        }
    }

    /// Pick colored or plain based on the environment.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a `key: value` line with the key padded to `width`.
    pub fn format_field(&self, key: &str, value: &str, width: usize) -> String {
        let label = format!("{:width$}", format!("{}:", key), width = width + 1);
        format!("{} {}", self.key.apply_to(label), value)
    }

    /// Status cell colored by state.
    pub fn format_status(&self, status: VmStatus) -> String {
        match status {
            VmStatus::Running => format!("{}", self.running.apply_to("running")),
            VmStatus::Stopped => format!("{}", self.dim.apply_to("stopped")),
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_messages() {
        let theme = RoostTheme::plain();
        assert_eq!(theme.format_success("Created"), "✓ Created");
        assert_eq!(theme.format_warning("Careful"), "⚠ Careful");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn field_is_padded() {
        let theme = RoostTheme::plain();
        assert_eq!(theme.format_field("cpu", "4", 6), "cpu:    4");
        assert_eq!(theme.format_field("memory", "4GB", 6), "memory: 4GB");
    }

    #[test]
    fn status_cells() {
        let theme = RoostTheme::plain();
        assert_eq!(theme.format_status(VmStatus::Running), "running");
        assert_eq!(theme.format_status(VmStatus::Stopped), "stopped");
    }

    #[test]
    fn default_impl_matches_new() {
        assert_eq!(
            RoostTheme::default().format_success("ok"),
            RoostTheme::new().format_success("ok")
        );
    }
}
