//! Visual theme and styling.

use console::Style;

/// Terminal styles for run output.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for passed behaviours (green).
    pub success: Style,
    /// Style for failures (red bold).
    pub error: Style,
    /// Style for running behaviours (magenta).
    pub info: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
            info: Style::new(),
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a running message.
    pub fn format_running(&self, msg: &str) -> String {
        format!("{}", self.info.apply_to(format!("◉ {}", msg)))
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_running() {
        let msg = Theme::plain().format_running("login");
        assert_eq!(msg, "◉ login");
    }

    #[test]
    fn theme_formats_success() {
        let msg = Theme::plain().format_success("Complete");
        assert!(msg.contains("✓"));
        assert!(msg.contains("Complete"));
    }

    #[test]
    fn theme_formats_error() {
        let msg = Theme::plain().format_error("Failed");
        assert!(msg.contains("✗"));
        assert!(msg.contains("Failed"));
    }
}
