//! Scripted runner for testing.
//!
//! `MockRunner` implements [`Runner`] by handing out queued outcomes in
//! order and recording every request it receives.
//!
//! # Example
//!
//! ```
//! use behaviours::transport::{MockRunner, Request, Response, Runner};
//!
//! let runner = MockRunner::new()
//!     .with_response(Response::new(200).with_body("token=abc"))
//!     .with_failure("connection reset");
//!
//! assert!(runner.dispatch(Request::get("http://api.test/a")).is_ok());
//! assert!(runner.dispatch(Request::get("http://api.test/b")).is_err());
//! assert_eq!(runner.request_count(), 2);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;

use super::{DispatchError, Request, Response, Runner};

/// Runner returning pre-configured outcomes.
///
/// Once the queue is exhausted every dispatch fails with
/// [`DispatchError::Injected`].
#[derive(Debug, Default)]
pub struct MockRunner {
    outcomes: RefCell<VecDeque<Result<Response, DispatchError>>>,
    requests: RefCell<Vec<Request>>,
}

impl MockRunner {
    /// Create a runner with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn with_response(self, response: Response) -> Self {
        self.push_response(response);
        self
    }

    /// Queue a dispatch failure.
    pub fn with_failure(self, message: &str) -> Self {
        self.push_failure(message);
        self
    }

    /// Queue a response on a runner that is already shared.
    pub fn push_response(&self, response: Response) {
        self.outcomes.borrow_mut().push_back(Ok(response));
    }

    /// Queue a dispatch failure on a runner that is already shared.
    pub fn push_failure(&self, message: &str) {
        self.outcomes
            .borrow_mut()
            .push_back(Err(DispatchError::Injected {
                message: message.to_string(),
            }));
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Number of queued outcomes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.outcomes.borrow().len()
    }
}

impl Runner for MockRunner {
    fn dispatch(&self, request: Request) -> Result<Response, DispatchError> {
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| {
                Err(DispatchError::Injected {
                    message: format!("no response queued for {}", url),
                })
            })
    }
}
