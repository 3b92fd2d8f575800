//! Progress and failure reporting.
//!
//! This module provides:
//! - [`Reporter`] trait for the log + fatal capability the executor needs
//! - [`PanicReporter`] for use inside `#[test]` functions
//! - [`TerminalReporter`] for the command line
//! - [`MockReporter`] for asserting on what was reported
//!
//! # Example
//!
//! ```
//! use behaviours::report::{MockReporter, Reporter};
//!
//! let mut reporter = MockReporter::new();
//! reporter.log("Running behaviour \"login\"");
//! reporter.fatal("Error checking behaviour \"login\": expected status 200, got 500");
//!
//! assert_eq!(reporter.fatals().len(), 1);
//! assert!(reporter.has_fatal("login"));
//! ```

pub mod mock;
pub mod output;
pub mod panic;
pub mod terminal;
pub mod theme;

pub use mock::MockReporter;
pub use output::OutputMode;
pub use panic::PanicReporter;
pub use terminal::TerminalReporter;
pub use theme::Theme;

/// Sink for run progress and failures.
///
/// After [`fatal`](Reporter::fatal) the executor stops the run and returns;
/// an implementation may also abort the surrounding test (see
/// [`PanicReporter`]).
pub trait Reporter {
    /// Log an informational message.
    fn log(&mut self, msg: &str);

    /// Report that a behaviour passed.
    fn completed(&mut self, msg: &str) {
        self.log(msg);
    }

    /// Report a failure that ends the current run.
    fn fatal(&mut self, msg: &str);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn log(&mut self, msg: &str) {
        (**self).log(msg);
    }

    fn completed(&mut self, msg: &str) {
        (**self).completed(msg);
    }

    fn fatal(&mut self, msg: &str) {
        (**self).fatal(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LogOnly(Vec<String>);

    impl Reporter for LogOnly {
        fn log(&mut self, msg: &str) {
            self.0.push(msg.to_string());
        }

        fn fatal(&mut self, msg: &str) {
            self.0.push(format!("FATAL {}", msg));
        }
    }

    #[test]
    fn completed_defaults_to_log() {
        let mut reporter = LogOnly(Vec::new());
        reporter.completed("step passed");
        assert_eq!(reporter.0, vec!["step passed".to_string()]);
    }

    #[test]
    fn mutable_reference_forwards() {
        fn report_through(mut reporter: impl Reporter) {
            reporter.log("a");
            reporter.fatal("b");
        }

        let mut inner = LogOnly(Vec::new());
        report_through(&mut inner);
        assert_eq!(inner.0, vec!["a".to_string(), "FATAL b".to_string()]);
    }
}
