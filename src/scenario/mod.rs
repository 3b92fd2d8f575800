//! Declarative scenarios.
//!
//! A scenario is a YAML file describing a behaviour chain:
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Validation in [`validator`]
//! - `${...}` references in [`interpolation`]
//! - The [`Behaviour`](crate::behaviour::Behaviour) implementation in
//!   [`declared`]
//!
//! # Example
//!
//! ```
//! use behaviours::executor::run;
//! use behaviours::report::MockReporter;
//! use behaviours::scenario::{declared_behaviours, parse_scenario, validate, InterpolationContext};
//! use behaviours::transport::{MockRunner, Response};
//!
//! let scenario = parse_scenario(r#"
//! settings:
//!   base_url: http://api.test
//! behaviours:
//!   - description: log in
//!     request: { method: POST, url: /login }
//!   - description: fetch profile
//!     request:
//!       url: /profile
//!       headers: { Authorization: "Bearer ${previous.json.token}" }
//! "#).unwrap();
//! validate(&scenario).unwrap();
//!
//! let ctx = InterpolationContext::new();
//! let runner = MockRunner::new()
//!     .with_response(Response::new(200).with_body(r#"{"token":"abc"}"#))
//!     .with_response(Response::new(200).with_body("name=Alice"));
//!
//! let result = run(&mut MockReporter::new(), &runner, &declared_behaviours(&scenario, &ctx));
//! assert!(result.success());
//! assert_eq!(runner.requests()[1].header_value("Authorization"), Some("Bearer abc"));
//! ```

pub mod declared;
pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validator;

pub use declared::{declared_behaviours, DeclaredBehaviour};
pub use interpolation::{resolve_string, InterpolationContext, Reference};
pub use loader::{load_scenario, parse_scenario};
pub use schema::{BehaviourConfig, ExpectConfig, RequestConfig, ScenarioConfig, Settings};
pub use validator::{validate, validate_scenario, ScenarioIssue};
