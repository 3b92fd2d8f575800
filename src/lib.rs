//! Behaviours - Sequential HTTP behaviour chains for integration tests.
//!
//! A behaviour pairs a request builder with a response checker. Behaviours
//! run in order; each request may be built from the response to the one
//! before it, and the first failure stops the chain.
//!
//! # Modules
//!
//! - [`behaviour`] - The [`Behaviour`] trait and closure-based behaviours
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`executor`] - The fail-fast chain runner
//! - [`report`] - Progress and failure reporting
//! - [`scenario`] - Behaviour chains declared in YAML
//! - [`transport`] - Requests, responses and the [`Runner`] seam
//!
//! # Example
//!
//! ```
//! use behaviours::behaviour::{checks, StatelessBehaviour};
//! use behaviours::error::RequestConstructionError;
//! use behaviours::executor::run;
//! use behaviours::report::MockReporter;
//! use behaviours::transport::{MockRunner, Request, Response};
//!
//! let login = StatelessBehaviour::new(
//!     "log in",
//!     |_| Ok(Request::post("http://api.test/login").body("user=alice")),
//!     checks::expect_status(200),
//! );
//! let profile = StatelessBehaviour::new(
//!     "fetch profile",
//!     |previous| {
//!         let token = previous
//!             .map(|r| r.body.clone())
//!             .ok_or_else(|| RequestConstructionError::new("no login response"))?;
//!         Ok(Request::get("http://api.test/profile").header("Authorization", token))
//!     },
//!     checks::expect_body_contains("alice"),
//! );
//!
//! let runner = MockRunner::new()
//!     .with_response(Response::new(200).with_body("t-123"))
//!     .with_response(Response::new(200).with_body("name=alice"));
//! let mut reporter = MockReporter::new();
//!
//! let result = run(&mut reporter, &runner, &[login, profile]);
//! assert!(result.success());
//! assert_eq!(runner.requests()[1].header_value("Authorization"), Some("t-123"));
//! ```
//!
//! For live HTTP runs, see the integration tests.

pub mod behaviour;
pub mod cli;
pub mod error;
pub mod executor;
pub mod report;
pub mod scenario;
pub mod transport;

pub use behaviour::{Behaviour, StatelessBehaviour};
pub use error::{HarnessError, RequestConstructionError, Result, ValidationError};
pub use executor::{run, RunResult};
pub use report::Reporter;
pub use transport::{DispatchError, Request, Response, Runner};
