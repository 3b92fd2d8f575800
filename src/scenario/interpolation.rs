//! Variable interpolation for request templates.
//!
//! Scenario strings reference the previous response and the environment
//! using `${...}` syntax.
//!
//! # Syntax
//!
//! - `${previous.status}` - status code of the previous response
//! - `${previous.body}` - body of the previous response
//! - `${previous.header.<name>}` - a header of the previous response
//! - `${previous.json.<path>}` - a value inside a JSON body, with `.`
//!   separating object keys and array indices
//! - `${env.<NAME>}` - an environment variable
//! - `$${escaped}` - produces literal `${escaped}` in output
//!
//! # Example
//!
//! ```yaml
//! headers:
//!   Authorization: "Bearer ${previous.json.token}"
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RequestConstructionError;
use crate::transport::Response;

/// `previous.status`, `previous.body`, `previous.header.<name>`,
/// `previous.json.<path>`, `env.<NAME>`.
static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:previous\.(?P<field>status|body)|previous\.header\.(?P<header>[A-Za-z0-9!#$%&'*+.^_`|~-]+)|previous\.json\.(?P<json>[^.\s]+(?:\.[^.\s]+)*)|env\.(?P<env>[A-Za-z_][A-Za-z0-9_]*))$",
    )
    .expect("REFERENCE_REGEX must compile")
});

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// A parsed `${...}` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// `previous.status`
    Status,
    /// `previous.body`
    Body,
    /// `previous.header.<name>`
    Header(String),
    /// `previous.json.<path>`
    Json(Vec<String>),
    /// `env.<NAME>`
    Env(String),
}

impl Reference {
    /// Parse a variable name into a reference.
    ///
    /// Returns `None` for anything that is not one of the supported forms.
    pub fn parse(name: &str) -> Option<Self> {
        let caps = REFERENCE_REGEX.captures(name)?;

        if let Some(field) = caps.name("field") {
            return Some(match field.as_str() {
                "status" => Reference::Status,
                _ => Reference::Body,
            });
        }
        if let Some(header) = caps.name("header") {
            return Some(Reference::Header(header.as_str().to_string()));
        }
        if let Some(path) = caps.name("json") {
            return Some(Reference::Json(
                path.as_str().split('.').map(String::from).collect(),
            ));
        }
        caps.name("env")
            .map(|env| Reference::Env(env.as_str().to_string()))
    }

    /// Whether this reference reads from the previous response.
    pub fn needs_previous(&self) -> bool {
        !matches!(self, Reference::Env(_))
    }
}

/// Parse a string containing ${var} interpolations.
///
/// Supports:
/// - `${variable_name}` - variable interpolation
/// - `$${escaped}` - literal `${escaped}` in output
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push('$');
                }
            }
            Some('{') => {
                chars.next();

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                segments.push(Segment::Variable(var_name));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Extract all variable names from an interpolated string.
pub fn extract_variables(input: &str) -> HashSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            _ => None,
        })
        .collect()
}

/// Values available to `${env.*}` references.
#[derive(Debug, Default, Clone)]
pub struct InterpolationContext {
    /// Environment variables
    pub env: HashMap<String, String>,
}

impl InterpolationContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context holding the current process environment.
    pub fn from_process_env() -> Self {
        Self {
            env: std::env::vars().collect(),
        }
    }

    /// Add environment variables from a HashMap.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Resolve a reference against this context and the previous response.
    pub fn resolve(
        &self,
        reference: &Reference,
        previous: Option<&Response>,
    ) -> Result<String, RequestConstructionError> {
        match (reference, previous) {
            (Reference::Env(name), _) => self.env.get(name).cloned().ok_or_else(|| {
                RequestConstructionError::new(format!("environment variable {} is not set", name))
            }),
            (_, None) => Err(RequestConstructionError::new(
                "no previous response to read from",
            )),
            (Reference::Status, Some(previous)) => Ok(previous.status.to_string()),
            (Reference::Body, Some(previous)) => Ok(previous.body.clone()),
            (Reference::Header(name), Some(previous)) => {
                previous.header(name).map(String::from).ok_or_else(|| {
                    RequestConstructionError::new(format!(
                        "previous response has no '{}' header",
                        name
                    ))
                })
            }
            (Reference::Json(path), Some(previous)) => resolve_json(previous, path),
        }
    }
}

fn resolve_json(previous: &Response, path: &[String]) -> Result<String, RequestConstructionError> {
    let root = previous.json().map_err(|e| {
        RequestConstructionError::new(format!("previous response body is not JSON: {}", e))
    })?;

    let mut value = &root;
    for key in path {
        let next = match value {
            serde_json::Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => value.get(key.as_str()),
        };
        value = next.ok_or_else(|| {
            RequestConstructionError::new(format!(
                "previous response has no JSON value at '{}'",
                path.join(".")
            ))
        })?;
    }

    Ok(match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Resolve all references in an interpolated string.
///
/// # Errors
///
/// Returns a [`RequestConstructionError`] for unknown references and for
/// values missing from the context or the previous response.
pub fn resolve_string(
    input: &str,
    context: &InterpolationContext,
    previous: Option<&Response>,
) -> Result<String, RequestConstructionError> {
    let mut result = String::new();

    for segment in parse_interpolation(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let reference = Reference::parse(&name).ok_or_else(|| {
                    RequestConstructionError::new(format!("Unknown reference: ${{{}}}", name))
                })?;
                let value = context.resolve(&reference, previous).map_err(|e| {
                    RequestConstructionError::new(format!("${{{}}}: {}", name, e))
                })?;
                result.push_str(&value);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn previous() -> Response {
        Response::new(201)
            .with_header("X-Session", "s-1")
            .with_body(r#"{"token":"abc","user":{"id":7,"roles":["admin","dev"]}}"#)
    }

    #[test]
    fn parse_literal_only() {
        let result = parse_interpolation("hello world");
        assert_eq!(result, vec![Segment::Literal("hello world".to_string())]);
    }

    #[test]
    fn parse_variable_with_surrounding_text() {
        let result = parse_interpolation("Bearer ${previous.body}!");
        assert_eq!(
            result,
            vec![
                Segment::Literal("Bearer ".to_string()),
                Segment::Variable("previous.body".to_string()),
                Segment::Literal("!".to_string()),
            ]
        );
    }

    #[test]
    fn parse_escaped_dollar_brace() {
        let result = parse_interpolation("$${NOT_INTERPOLATED}");
        assert_eq!(
            result,
            vec![Segment::Literal("${NOT_INTERPOLATED}".to_string())]
        );
    }

    #[test]
    fn parse_lone_dollar_is_literal() {
        let result = parse_interpolation("cost: $5 and $$");
        assert_eq!(result, vec![Segment::Literal("cost: $5 and $".to_string())]);
    }

    #[test]
    fn extract_variables_deduplicates() {
        let vars = extract_variables("${env.A}/${env.A}/${previous.status}");
        assert_eq!(vars.len(), 2);
        assert!(vars.contains("env.A"));
        assert!(vars.contains("previous.status"));
    }

    #[test]
    fn reference_parse_forms() {
        assert_eq!(Reference::parse("previous.status"), Some(Reference::Status));
        assert_eq!(Reference::parse("previous.body"), Some(Reference::Body));
        assert_eq!(
            Reference::parse("previous.header.X-Session"),
            Some(Reference::Header("X-Session".into()))
        );
        assert_eq!(
            Reference::parse("previous.json.user.roles.0"),
            Some(Reference::Json(vec!["user".into(), "roles".into(), "0".into()]))
        );
        assert_eq!(
            Reference::parse("env.API_KEY"),
            Some(Reference::Env("API_KEY".into()))
        );
    }

    #[test]
    fn reference_parse_rejects_unknown() {
        assert_eq!(Reference::parse("token"), None);
        assert_eq!(Reference::parse("previous.cookies"), None);
        assert_eq!(Reference::parse("previous.json."), None);
        assert_eq!(Reference::parse("env.1BAD"), None);
    }

    #[test]
    fn only_env_is_independent_of_previous() {
        assert!(!Reference::Env("X".into()).needs_previous());
        assert!(Reference::Status.needs_previous());
        assert!(Reference::Json(vec!["a".into()]).needs_previous());
    }

    #[test]
    fn resolves_previous_fields() {
        let ctx = InterpolationContext::new();
        let prev = previous();

        assert_eq!(
            resolve_string("${previous.status}", &ctx, Some(&prev)).unwrap(),
            "201"
        );
        assert_eq!(
            resolve_string("${previous.header.x-session}", &ctx, Some(&prev)).unwrap(),
            "s-1"
        );
        assert_eq!(
            resolve_string("Bearer ${previous.json.token}", &ctx, Some(&prev)).unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn resolves_nested_json_and_indices() {
        let ctx = InterpolationContext::new();
        let prev = previous();

        assert_eq!(
            resolve_string("${previous.json.user.id}", &ctx, Some(&prev)).unwrap(),
            "7"
        );
        assert_eq!(
            resolve_string("${previous.json.user.roles.1}", &ctx, Some(&prev)).unwrap(),
            "dev"
        );
    }

    #[test]
    fn resolves_env() {
        let mut env = HashMap::new();
        env.insert("API_KEY".to_string(), "k-123".to_string());
        let ctx = InterpolationContext::new().with_env(env);

        assert_eq!(
            resolve_string("key=${env.API_KEY}", &ctx, None).unwrap(),
            "key=k-123"
        );
    }

    #[test]
    fn missing_previous_is_construction_error() {
        let ctx = InterpolationContext::new();
        let err = resolve_string("${previous.body}", &ctx, None).unwrap_err();
        assert!(err.message.contains("no previous response"));
    }

    #[test]
    fn missing_json_path_is_construction_error() {
        let ctx = InterpolationContext::new();
        let prev = previous();
        let err = resolve_string("${previous.json.user.email}", &ctx, Some(&prev)).unwrap_err();
        assert!(err.message.contains("user.email"));
    }

    #[test]
    fn non_json_body_is_construction_error() {
        let ctx = InterpolationContext::new();
        let prev = Response::new(200).with_body("token=abc");
        let err = resolve_string("${previous.json.token}", &ctx, Some(&prev)).unwrap_err();
        assert!(err.message.contains("not JSON"));
    }

    #[test]
    fn missing_header_is_construction_error() {
        let ctx = InterpolationContext::new();
        let prev = previous();
        let err = resolve_string("${previous.header.etag}", &ctx, Some(&prev)).unwrap_err();
        assert!(err.message.contains("etag"));
    }

    #[test]
    fn unknown_reference_is_construction_error() {
        let ctx = InterpolationContext::new();
        let err = resolve_string("${token}", &ctx, None).unwrap_err();
        assert!(err.message.contains("Unknown reference"));
    }

    #[test]
    fn missing_env_is_construction_error() {
        let ctx = InterpolationContext::new();
        let err = resolve_string("${env.NOT_SET_ANYWHERE}", &ctx, None).unwrap_err();
        assert!(err.message.contains("NOT_SET_ANYWHERE"));
    }
}
