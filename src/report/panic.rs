//! Reporter for use inside Rust tests.

use super::Reporter;

/// Reporter that panics on a fatal failure.
///
/// Panicking is how a `#[test]` function aborts, so handing this to the
/// executor makes a failed behaviour fail the enclosing test with the
/// behaviour's description in the panic message. Log messages go to
/// `tracing` at INFO level.
///
/// # Example
///
/// ```should_panic
/// use behaviours::report::{PanicReporter, Reporter};
///
/// let mut reporter = PanicReporter::new();
/// reporter.fatal("Error checking behaviour \"login\": expected status 200, got 500");
/// ```
#[derive(Debug, Default)]
pub struct PanicReporter {
    logged: usize,
}

impl PanicReporter {
    /// Create a new reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of log and completion messages seen.
    pub fn logged(&self) -> usize {
        self.logged
    }
}

impl Reporter for PanicReporter {
    fn log(&mut self, msg: &str) {
        self.logged += 1;
        tracing::info!("{}", msg);
    }

    fn fatal(&mut self, msg: &str) {
        tracing::error!("{}", msg);
        panic!("{}", msg);
    }
}
