//! Behaviours: one step of a request chain.
//!
//! A [`Behaviour`] is a codified expectation that a request, possibly built
//! from the previous step's response, yields a response/error combination
//! meeting some criteria. Behaviours are chained: each one's request is
//! dispatched, its outcome checked, and its response handed to the next
//! behaviour's [`Behaviour::build_request`].
//!
//! - [`StatelessBehaviour`] - closure-based behaviour for stateless flows
//! - [`checks`] - ready-made checkers for common expectations
//!
//! Stateful behaviours implement the trait on their own type. The executor
//! only ever holds `&self`, so state that changes during a run lives behind
//! interior mutability.

pub mod checks;
pub mod stateless;

pub use stateless::StatelessBehaviour;

use crate::error::{RequestConstructionError, ValidationError};
use crate::transport::{DispatchError, Request, Response};

/// One step in a request chain.
pub trait Behaviour {
    /// Human-readable label used in reports. Need not be unique.
    fn description(&self) -> &str;

    /// Build the request for this step.
    ///
    /// `previous` is `None` for the first behaviour in a run and the
    /// immediately preceding step's response otherwise. It is also `None`
    /// when the preceding step's dispatch failed and its checker accepted
    /// the failure.
    fn build_request(
        &self,
        previous: Option<&Response>,
    ) -> Result<Request, RequestConstructionError>;

    /// Judge the outcome of dispatching this step's request.
    fn check_response(
        &self,
        outcome: Result<&Response, &DispatchError>,
    ) -> Result<(), ValidationError>;
}

impl<B: Behaviour + ?Sized> Behaviour for &B {
    fn description(&self) -> &str {
        (**self).description()
    }

    fn build_request(
        &self,
        previous: Option<&Response>,
    ) -> Result<Request, RequestConstructionError> {
        (**self).build_request(previous)
    }

    fn check_response(
        &self,
        outcome: Result<&Response, &DispatchError>,
    ) -> Result<(), ValidationError> {
        (**self).check_response(outcome)
    }
}

impl<B: Behaviour + ?Sized> Behaviour for Box<B> {
    fn description(&self) -> &str {
        (**self).description()
    }

    fn build_request(
        &self,
        previous: Option<&Response>,
    ) -> Result<Request, RequestConstructionError> {
        (**self).build_request(previous)
    }

    fn check_response(
        &self,
        outcome: Result<&Response, &DispatchError>,
    ) -> Result<(), ValidationError> {
        (**self).check_response(outcome)
    }
}
