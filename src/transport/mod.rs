//! Request dispatch.
//!
//! This module provides the transport seam between behaviours and the
//! network:
//!
//! - [`Request`] / [`Response`] - plain values exchanged with a runner
//! - [`Runner`] - the single dispatch capability
//! - [`HttpRunner`] - blocking HTTP runner backed by `reqwest`
//! - [`MockRunner`] - scripted runner for tests
//!
//! `reqwest::blocking::Client` implements [`Runner`] directly, so a shared
//! client can be handed to the executor as-is.
//!
//! # Example
//!
//! ```
//! use behaviours::transport::{MockRunner, Request, Response, Runner};
//!
//! let runner = MockRunner::new().with_response(Response::new(204));
//! let response = runner.dispatch(Request::delete("http://api.test/items/1")).unwrap();
//! assert_eq!(response.status, 204);
//! assert_eq!(runner.requests()[0].url, "http://api.test/items/1");
//! ```

pub mod http;
pub mod mock;

pub use http::HttpRunner;
pub use mock::MockRunner;
pub use reqwest::Method;

use thiserror::Error;

/// An HTTP request produced by a behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs in insertion order.
    pub headers: Vec<(String, String)>,
    /// Optional request body.
    pub body: Option<String>,
}

impl Request {
    /// Create a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Create a PUT request.
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Create a DELETE request.
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up the first header with the given name (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// The response obtained by dispatching a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Header name/value pairs. Values that are not valid UTF-8 are dropped.
    pub headers: Vec<(String, String)>,
    /// Response body as text.
    pub body: String,
}

impl Response {
    /// Create a response with an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up the first header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Failure raised while dispatching a request.
///
/// Handed to the behaviour's checker, which decides whether it fails the
/// step.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The HTTP client failed (connect, TLS, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request could not be turned into an HTTP call.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// A failure produced by a test double.
    #[error("Injected failure: {message}")]
    Injected { message: String },
}

/// Something that turns a [`Request`] into a [`Response`].
///
/// Retries, pooling, and timeouts are the implementation's business.
pub trait Runner {
    /// Dispatch a request.
    fn dispatch(&self, request: Request) -> Result<Response, DispatchError>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn dispatch(&self, request: Request) -> Result<Response, DispatchError> {
        (**self).dispatch(request)
    }
}

impl<R: Runner + ?Sized> Runner for Box<R> {
    fn dispatch(&self, request: Request) -> Result<Response, DispatchError> {
        (**self).dispatch(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_sets_fields() {
        let req = Request::post("http://api.test/login")
            .header("Content-Type", "text/plain")
            .body("user=alice");

        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url, "http://api.test/login");
        assert_eq!(req.header_value("content-type"), Some("text/plain"));
        assert_eq!(req.body.as_deref(), Some("user=alice"));
    }

    #[test]
    fn request_get_has_no_body() {
        let req = Request::get("http://api.test/");
        assert_eq!(req.method, Method::GET);
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn response_header_lookup_is_case_insensitive() {
        let resp = Response::new(200).with_header("X-Token", "abc");
        assert_eq!(resp.header("x-token"), Some("abc"));
        assert_eq!(resp.header("X-TOKEN"), Some("abc"));
        assert_eq!(resp.header("missing"), None);
    }

    #[test]
    fn response_is_success_for_2xx_only() {
        assert!(Response::new(200).is_success());
        assert!(Response::new(204).is_success());
        assert!(!Response::new(301).is_success());
        assert!(!Response::new(404).is_success());
    }

    #[test]
    fn response_json_parses_body() {
        let resp = Response::new(200).with_body(r#"{"token":"abc"}"#);
        let json = resp.json().unwrap();
        assert_eq!(json["token"], "abc");
    }

    #[test]
    fn response_json_rejects_plain_text() {
        let resp = Response::new(200).with_body("token=abc");
        assert!(resp.json().is_err());
    }

    #[test]
    fn dispatch_error_displays_message() {
        let err = DispatchError::Injected {
            message: "connection refused".into(),
        };
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn boxed_runner_dispatches() {
        let runner: Box<dyn Runner> = Box::new(MockRunner::new().with_response(Response::new(201)));
        let resp = runner.dispatch(Request::get("http://api.test/")).unwrap();
        assert_eq!(resp.status, 201);
    }
}
