//! Error types for behaviour runs.
//!
//! Two error kinds end a run: [`RequestConstructionError`], raised when a
//! behaviour cannot build its request, and [`ValidationError`], raised when
//! a behaviour rejects the outcome of a dispatch. Transport failures are
//! [`DispatchError`](crate::transport::DispatchError)s and are never fatal on
//! their own; the behaviour's checker decides what they mean.
//!
//! [`HarnessError`] covers everything around a run: loading and validating
//! scenario files, I/O, and wrapped `anyhow` errors.

use std::path::PathBuf;
use thiserror::Error;

/// A behaviour could not produce its next request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestConstructionError {
    /// What was missing or malformed.
    pub message: String,
}

impl RequestConstructionError {
    /// Create a construction error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A behaviour rejected the response/error pair it was given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Why the outcome is unacceptable.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Core error type for loading and running scenarios.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Scenario file not found at the given location.
    #[error("Scenario not found: {path}")]
    ScenarioNotFound { path: PathBuf },

    /// Failed to parse a scenario file.
    #[error("Failed to parse scenario at {path}: {message}")]
    ScenarioParseError { path: PathBuf, message: String },

    /// Scenario parsed but is not runnable.
    #[error("Invalid scenario: {message}")]
    ScenarioValidationError { message: String },

    /// A request could not be built.
    #[error("Request construction failed: {0}")]
    RequestConstruction(#[from] RequestConstructionError),

    /// A response failed its expectation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
