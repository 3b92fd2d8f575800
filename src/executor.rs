//! Sequential behaviour execution.
//!
//! [`run`] walks a list of behaviours in declaration order. Each step builds
//! its request from the previous step's response, dispatches it through the
//! runner, and hands the outcome to the behaviour's checker. The first
//! construction or check failure is reported as fatal and ends the run.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::behaviour::Behaviour;
use crate::error::{RequestConstructionError, ValidationError};
use crate::report::Reporter;
use crate::transport::{Response, Runner};

/// Status of a behaviour in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Request built, dispatched, and accepted by the checker.
    Passed,

    /// Request could not be built.
    ConstructionFailed,

    /// Checker rejected the outcome.
    CheckFailed,
}

impl StepStatus {
    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            StepStatus::Passed => '✓',
            StepStatus::ConstructionFailed | StepStatus::CheckFailed => '✗',
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Passed => "passed",
            StepStatus::ConstructionFailed => "construction failed",
            StepStatus::CheckFailed => "check failed",
        };
        write!(f, "{}", s)
    }
}

/// Why a behaviour failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepFailure {
    /// The request builder failed.
    Construction(RequestConstructionError),
    /// The checker failed.
    Validation(ValidationError),
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepFailure::Construction(e) => write!(f, "{}", e),
            StepFailure::Validation(e) => write!(f, "{}", e),
        }
    }
}

/// Result of executing one behaviour.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Behaviour description.
    pub description: String,

    /// Time spent building, dispatching, and checking.
    pub duration: Duration,

    /// Failure, if the behaviour did not pass.
    pub failure: Option<StepFailure>,
}

impl StepResult {
    /// Get the status of this result.
    pub fn status(&self) -> StepStatus {
        match self.failure {
            None => StepStatus::Passed,
            Some(StepFailure::Construction(_)) => StepStatus::ConstructionFailed,
            Some(StepFailure::Validation(_)) => StepStatus::CheckFailed,
        }
    }

    /// Whether the behaviour passed.
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Generate a summary line for display.
    pub fn summary_line(&self) -> String {
        let status = self.status();
        match &self.failure {
            None => format!(
                "{} {} ({})",
                status.display_char(),
                self.description,
                format_duration(self.duration)
            ),
            Some(failure) => format!(
                "{} {} - {}",
                status.display_char(),
                self.description,
                failure
            ),
        }
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Results for every behaviour that was started, in order.
    pub steps: Vec<StepResult>,

    /// Number of behaviours in the run, started or not.
    pub total: usize,

    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl RunResult {
    /// Whether every behaviour passed.
    pub fn success(&self) -> bool {
        self.steps.len() == self.total && self.steps.iter().all(StepResult::passed)
    }

    /// Number of behaviours that passed.
    pub fn passed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.passed()).count()
    }

    /// The behaviour that stopped the run, if any.
    pub fn failed_step(&self) -> Option<&StepResult> {
        self.steps.iter().find(|s| !s.passed())
    }

    /// Number of behaviours never started because of an earlier failure.
    pub fn not_run(&self) -> usize {
        self.total - self.steps.len()
    }

    /// Generate a one-line summary of the run.
    pub fn summary_line(&self) -> String {
        let duration = format_duration(self.duration);
        if self.success() {
            format!("{} of {} behaviours passed ({})", self.total, self.total, duration)
        } else {
            format!(
                "{} passed, 1 failed, {} not run ({})",
                self.passed_count(),
                self.not_run(),
                duration
            )
        }
    }
}

/// Run behaviours in order, threading each response into the next request.
///
/// The first behaviour receives no previous response. Every later behaviour
/// receives the response dispatched for its immediate predecessor, or `None`
/// when that dispatch failed and the predecessor's checker accepted it.
///
/// A failed request build or check is reported through
/// [`Reporter::fatal`] with the behaviour's description, and the run stops:
/// no later behaviour is touched.
pub fn run<R, B>(reporter: &mut dyn Reporter, runner: &R, behaviours: &[B]) -> RunResult
where
    R: Runner + ?Sized,
    B: Behaviour,
{
    let start = Instant::now();
    let mut steps = Vec::with_capacity(behaviours.len());
    let mut previous: Option<Response> = None;

    for (index, behaviour) in behaviours.iter().enumerate() {
        let description = behaviour.description();
        let step_start = Instant::now();
        reporter.log(&format!("Running behaviour \"{}\"", description));

        let request = match behaviour.build_request(previous.as_ref()) {
            Ok(request) => request,
            Err(e) => {
                warn!(
                    "Behaviour {} '{}' could not build request: {}",
                    index + 1,
                    description,
                    e
                );
                reporter.fatal(&format!(
                    "Error building request for behaviour \"{}\": {}",
                    description, e
                ));
                steps.push(StepResult {
                    description: description.to_string(),
                    duration: step_start.elapsed(),
                    failure: Some(StepFailure::Construction(e)),
                });
                break;
            }
        };

        debug!(
            "Behaviour {} '{}': {} {}",
            index + 1,
            description,
            request.method,
            request.url
        );
        let outcome = runner.dispatch(request);
        if let Err(e) = &outcome {
            debug!(
                "Behaviour {} '{}' dispatch failed: {}",
                index + 1,
                description,
                e
            );
        }

        if let Err(e) = behaviour.check_response(outcome.as_ref()) {
            warn!(
                "Behaviour {} '{}' failed its check: {}",
                index + 1,
                description,
                e
            );
            reporter.fatal(&format!(
                "Error checking behaviour \"{}\": {}",
                description, e
            ));
            steps.push(StepResult {
                description: description.to_string(),
                duration: step_start.elapsed(),
                failure: Some(StepFailure::Validation(e)),
            });
            break;
        }

        let duration = step_start.elapsed();
        reporter.completed(&format!(
            "Behaviour \"{}\" passed ({})",
            description,
            format_duration(duration)
        ));
        steps.push(StepResult {
            description: description.to_string(),
            duration,
            failure: None,
        });

        previous = outcome.ok();
    }

    RunResult {
        steps,
        total: behaviours.len(),
        duration: start.elapsed(),
    }
}

/// Format a duration for display.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs == 0 {
        format!("{}ms", millis)
    } else if secs < 60 {
        format!("{}.{}s", secs, millis / 100)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}
