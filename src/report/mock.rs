//! Mock reporter for testing.
//!
//! `MockReporter` implements [`Reporter`] and captures every call for later
//! assertion. Unlike [`PanicReporter`](super::PanicReporter) it never
//! aborts, so tests can inspect a failed run.

use super::Reporter;

/// A single captured report, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// An informational message.
    Log(String),
    /// A behaviour passed.
    Completed(String),
    /// The run failed.
    Fatal(String),
}

/// Reporter that records everything it is told.
#[derive(Debug, Default)]
pub struct MockReporter {
    events: Vec<ReportEvent>,
}

impl MockReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events in order.
    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    /// All captured log messages.
    pub fn logs(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Log(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All captured completion messages.
    pub fn completions(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Completed(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All captured fatal messages.
    pub fn fatals(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Fatal(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Check if any log message contains `msg`.
    pub fn has_log(&self, msg: &str) -> bool {
        self.logs().iter().any(|m| m.contains(msg))
    }

    /// Check if any fatal message contains `msg`.
    pub fn has_fatal(&self, msg: &str) -> bool {
        self.fatals().iter().any(|m| m.contains(msg))
    }
}

impl Reporter for MockReporter {
    fn log(&mut self, msg: &str) {
        self.events.push(ReportEvent::Log(msg.to_string()));
    }

    fn completed(&mut self, msg: &str) {
        self.events.push(ReportEvent::Completed(msg.to_string()));
    }

    fn fatal(&mut self, msg: &str) {
        self.events.push(ReportEvent::Fatal(msg.to_string()));
    }
}
