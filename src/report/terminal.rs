//! Terminal reporter for the command line.

use super::{OutputMode, Reporter, Theme};

/// Reporter that prints styled lines to stdout/stderr.
///
/// Progress goes to stdout and respects the [`OutputMode`]; fatal failures
/// always go to stderr.
#[derive(Debug, Clone)]
pub struct TerminalReporter {
    mode: OutputMode,
    theme: Theme,
}

impl TerminalReporter {
    /// Create a reporter that picks colors from the terminal.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_theme(mode, Theme::detect())
    }

    /// Create a reporter with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: Theme) -> Self {
        Self { mode, theme }
    }

    /// Get the output mode.
    pub fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn render_log(&self, msg: &str) -> Option<String> {
        self.mode
            .shows_progress()
            .then(|| self.theme.format_running(msg))
    }

    fn render_completed(&self, msg: &str) -> Option<String> {
        self.mode
            .shows_status()
            .then(|| self.theme.format_success(msg))
    }

    fn render_fatal(&self, msg: &str) -> String {
        self.theme.format_error(msg)
    }
}

impl Reporter for TerminalReporter {
    fn log(&mut self, msg: &str) {
        if let Some(line) = self.render_log(msg) {
            println!("{}", line);
        }
    }

    fn completed(&mut self, msg: &str) {
        if let Some(line) = self.render_completed(msg) {
            println!("{}", line);
        }
    }

    fn fatal(&mut self, msg: &str) {
        eprintln!("{}", self.render_fatal(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter(mode: OutputMode) -> TerminalReporter {
        TerminalReporter::with_theme(mode, Theme::plain())
    }

    #[test]
    fn normal_mode_renders_progress_and_completion() {
        let r = reporter(OutputMode::Normal);
        assert_eq!(r.render_log("running"), Some("◉ running".to_string()));
        assert_eq!(r.render_completed("passed"), Some("✓ passed".to_string()));
    }

    #[test]
    fn quiet_mode_hides_progress() {
        let r = reporter(OutputMode::Quiet);
        assert_eq!(r.render_log("running"), None);
        assert!(r.render_completed("passed").is_some());
    }

    #[test]
    fn silent_mode_hides_everything_but_failures() {
        let r = reporter(OutputMode::Silent);
        assert_eq!(r.render_log("running"), None);
        assert_eq!(r.render_completed("passed"), None);
        assert_eq!(r.render_fatal("boom"), "✗ boom");
    }

    #[test]
    fn keeps_output_mode() {
        assert_eq!(reporter(OutputMode::Quiet).output_mode(), OutputMode::Quiet);
    }
}
