//! Behaviours built from scenario files.

use crate::behaviour::{checks, Behaviour};
use crate::error::{RequestConstructionError, ValidationError};
use crate::scenario::interpolation::{resolve_string, InterpolationContext};
use crate::scenario::schema::{BehaviourConfig, ScenarioConfig, Settings};
use crate::transport::{DispatchError, Method, Request, Response};

/// HTTP methods a scenario may use.
pub const SUPPORTED_METHODS: &[&str] = &[
    "GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS", "TRACE", "CONNECT",
];

/// Parse a scenario method name (case-insensitive).
pub fn parse_method(method: &str) -> Option<Method> {
    let upper = method.to_uppercase();
    if !SUPPORTED_METHODS.contains(&upper.as_str()) {
        return None;
    }
    Method::from_bytes(upper.as_bytes()).ok()
}

/// A [`Behaviour`] backed by a [`BehaviourConfig`].
#[derive(Debug, Clone, Copy)]
pub struct DeclaredBehaviour<'a> {
    config: &'a BehaviourConfig,
    settings: &'a Settings,
    context: &'a InterpolationContext,
}

impl<'a> DeclaredBehaviour<'a> {
    /// Create a behaviour from its declaration and the scenario settings.
    pub fn new(
        config: &'a BehaviourConfig,
        settings: &'a Settings,
        context: &'a InterpolationContext,
    ) -> Self {
        Self {
            config,
            settings,
            context,
        }
    }

    /// The declaration this behaviour was built from.
    pub fn config(&self) -> &BehaviourConfig {
        self.config
    }

    fn resolve_url(&self, previous: Option<&Response>) -> Result<String, RequestConstructionError> {
        let url = resolve_string(&self.config.request.url, self.context, previous)?;
        if is_absolute(&url) {
            return Ok(url);
        }

        let base = match &self.settings.base_url {
            Some(base) => resolve_string(base, self.context, None)?,
            None => {
                return Err(RequestConstructionError::new(format!(
                    "relative URL '{}' but no base_url is set",
                    url
                )))
            }
        };

        Ok(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            url.trim_start_matches('/')
        ))
    }
}

fn is_absolute(url: &str) -> bool {
    let scheme = url.split_once("://").map(|(scheme, _)| scheme);
    matches!(scheme, Some(s) if s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
}

/// Build one [`DeclaredBehaviour`] per declared behaviour, in order.
pub fn declared_behaviours<'a>(
    scenario: &'a ScenarioConfig,
    context: &'a InterpolationContext,
) -> Vec<DeclaredBehaviour<'a>> {
    scenario
        .behaviours
        .iter()
        .map(|b| DeclaredBehaviour::new(b, &scenario.settings, context))
        .collect()
}

impl Behaviour for DeclaredBehaviour<'_> {
    fn description(&self) -> &str {
        &self.config.description
    }

    fn build_request(
        &self,
        previous: Option<&Response>,
    ) -> Result<Request, RequestConstructionError> {
        let declared = &self.config.request;
        let method = parse_method(&declared.method).ok_or_else(|| {
            RequestConstructionError::new(format!("unsupported method '{}'", declared.method))
        })?;

        let mut request = Request::new(method, self.resolve_url(previous)?);

        for (name, value) in &self.settings.headers {
            if !declared.headers.keys().any(|k| k.eq_ignore_ascii_case(name)) {
                request = request.header(name, resolve_string(value, self.context, None)?);
            }
        }
        for (name, value) in &declared.headers {
            request = request.header(name, resolve_string(value, self.context, previous)?);
        }

        if let Some(body) = &declared.body {
            request = request.body(resolve_string(body, self.context, previous)?);
        }

        Ok(request)
    }

    fn check_response(
        &self,
        outcome: Result<&Response, &DispatchError>,
    ) -> Result<(), ValidationError> {
        let expect = &self.config.expect;

        if expect.dispatch_error {
            return checks::expect_dispatch_error()(outcome);
        }

        let response = checks::require_response(outcome)?;

        match expect.status {
            Some(status) => checks::expect_status(status)(Ok(response))?,
            None => checks::expect_success()(Ok(response))?,
        }

        for needle in &expect.body_contains {
            if !response.body.contains(needle.as_str()) {
                return Err(ValidationError::new(format!(
                    "expected body to contain '{}'",
                    needle
                )));
            }
        }

        for (name, expected) in &expect.header {
            match response.header(name) {
                Some(actual) if actual == expected.as_str() => {}
                Some(actual) => {
                    return Err(ValidationError::new(format!(
                        "expected header '{}' to be '{}', got '{}'",
                        name, expected, actual
                    )))
                }
                None => {
                    return Err(ValidationError::new(format!(
                        "expected header '{}' to be present",
                        name
                    )))
                }
            }
        }

        Ok(())
    }
}
