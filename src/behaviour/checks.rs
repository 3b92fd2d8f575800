//! Ready-made checkers.
//!
//! Each function returns a closure suitable as the checker of a
//! [`StatelessBehaviour`](super::StatelessBehaviour).

use crate::error::ValidationError;
use crate::transport::{DispatchError, Response};

/// Turn a dispatch failure into a [`ValidationError`].
pub fn require_response<'r>(
    outcome: Result<&'r Response, &DispatchError>,
) -> Result<&'r Response, ValidationError> {
    outcome.map_err(|e| ValidationError::new(format!("request failed: {}", e)))
}

/// Pass only when dispatch succeeded with the given status.
pub fn expect_status(
    status: u16,
) -> impl Fn(Result<&Response, &DispatchError>) -> Result<(), ValidationError> {
    move |outcome| {
        let response = require_response(outcome)?;
        if response.status == status {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "expected status {}, got {}",
                status, response.status
            )))
        }
    }
}

/// Pass only when dispatch succeeded with a 2xx status.
pub fn expect_success() -> impl Fn(Result<&Response, &DispatchError>) -> Result<(), ValidationError>
{
    |outcome| {
        let response = require_response(outcome)?;
        if response.is_success() {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "expected a 2xx status, got {}",
                response.status
            )))
        }
    }
}

/// Pass only when the response body contains `needle`.
pub fn expect_body_contains(
    needle: impl Into<String>,
) -> impl Fn(Result<&Response, &DispatchError>) -> Result<(), ValidationError> {
    let needle = needle.into();
    move |outcome| {
        let response = require_response(outcome)?;
        if response.body.contains(&needle) {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "expected body to contain '{}'",
                needle
            )))
        }
    }
}

/// Pass only when dispatch failed.
pub fn expect_dispatch_error(
) -> impl Fn(Result<&Response, &DispatchError>) -> Result<(), ValidationError> {
    |outcome| match outcome {
        Err(_) => Ok(()),
        Ok(response) => Err(ValidationError::new(format!(
            "expected dispatch to fail, got status {}",
            response.status
        ))),
    }
}

/// Pass regardless of outcome.
pub fn accept_any() -> impl Fn(Result<&Response, &DispatchError>) -> Result<(), ValidationError> {
    |_| Ok(())
}
