//! Closure-based behaviours.

use std::fmt;

use super::Behaviour;
use crate::error::{RequestConstructionError, ValidationError};
use crate::transport::{DispatchError, Request, Response};

type RequestFn<'a> =
    Box<dyn Fn(Option<&Response>) -> Result<Request, RequestConstructionError> + 'a>;
type CheckFn<'a> =
    Box<dyn Fn(Result<&Response, &DispatchError>) -> Result<(), ValidationError> + 'a>;

/// A [`Behaviour`] made of a description and two closures.
///
/// Keeps no state between requests of its own, which makes it the least
/// boilerplate for a stateless flow. Closures may still capture whatever the
/// caller hands them.
///
/// # Example
///
/// ```
/// use behaviours::behaviour::{checks, Behaviour, StatelessBehaviour};
/// use behaviours::transport::Request;
///
/// let health = StatelessBehaviour::new(
///     "service is healthy",
///     |_| Ok(Request::get("http://localhost:8080/health")),
///     checks::expect_status(200),
/// );
/// assert_eq!(health.description(), "service is healthy");
/// ```
pub struct StatelessBehaviour<'a> {
    description: String,
    request_fn: RequestFn<'a>,
    check_fn: CheckFn<'a>,
}

impl<'a> StatelessBehaviour<'a> {
    /// Create a behaviour from a request builder and a checker.
    pub fn new<F, C>(description: impl Into<String>, request_fn: F, check_fn: C) -> Self
    where
        F: Fn(Option<&Response>) -> Result<Request, RequestConstructionError> + 'a,
        C: Fn(Result<&Response, &DispatchError>) -> Result<(), ValidationError> + 'a,
    {
        Self {
            description: description.into(),
            request_fn: Box::new(request_fn),
            check_fn: Box::new(check_fn),
        }
    }
}

impl Behaviour for StatelessBehaviour<'_> {
    fn description(&self) -> &str {
        &self.description
    }

    fn build_request(
        &self,
        previous: Option<&Response>,
    ) -> Result<Request, RequestConstructionError> {
        (self.request_fn)(previous)
    }

    fn check_response(
        &self,
        outcome: Result<&Response, &DispatchError>,
    ) -> Result<(), ValidationError> {
        (self.check_fn)(outcome)
    }
}

impl fmt::Debug for StatelessBehaviour<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatelessBehaviour")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
