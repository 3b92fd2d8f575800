//! Scenario validation rules.
//!
//! This module checks a parsed scenario before it runs:
//! - There must be at least one behaviour
//! - Every behaviour needs a description and a URL
//! - Methods must be standard HTTP methods
//! - Every `${...}` reference must be well-formed
//! - The first behaviour and the shared settings cannot read `previous.*`
//! - Expected status codes must be real status codes

use crate::error::{HarnessError, Result};
use crate::scenario::declared::parse_method;
use crate::scenario::interpolation::{extract_variables, Reference};
use crate::scenario::schema::ScenarioConfig;

/// A problem found in a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioIssue {
    /// Rule identifier
    pub rule: String,
    /// Human-readable message
    pub message: String,
    /// Zero-based behaviour index if the issue is behaviour-specific
    pub behaviour: Option<usize>,
}

impl ScenarioIssue {
    fn new(rule: &str, message: String, behaviour: Option<usize>) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            behaviour,
        }
    }
}

/// Validate a scenario and return every issue found.
///
/// Collects all issues rather than stopping at the first one.
pub fn validate_scenario(scenario: &ScenarioConfig) -> Vec<ScenarioIssue> {
    let mut issues = Vec::new();

    if scenario.behaviours.is_empty() {
        issues.push(ScenarioIssue::new(
            "no-behaviours",
            "Scenario declares no behaviours".to_string(),
            None,
        ));
    }

    issues.extend(validate_settings(scenario));

    for (index, behaviour) in scenario.behaviours.iter().enumerate() {
        let label = if behaviour.description.trim().is_empty() {
            issues.push(ScenarioIssue::new(
                "empty-description",
                format!("Behaviour {} has no description", index + 1),
                Some(index),
            ));
            format!("#{}", index + 1)
        } else {
            format!("'{}'", behaviour.description)
        };

        if behaviour.request.url.trim().is_empty() {
            issues.push(ScenarioIssue::new(
                "empty-url",
                format!("Behaviour {} has no request URL", label),
                Some(index),
            ));
        }

        if parse_method(&behaviour.request.method).is_none() {
            issues.push(ScenarioIssue::new(
                "unknown-method",
                format!(
                    "Behaviour {} uses unknown method '{}'",
                    label, behaviour.request.method
                ),
                Some(index),
            ));
        }

        let templates = std::iter::once(&behaviour.request.url)
            .chain(behaviour.request.headers.values())
            .chain(behaviour.request.body.iter());
        for template in templates {
            issues.extend(validate_references(
                template,
                index == 0,
                &format!("Behaviour {}", label),
                Some(index),
            ));
        }

        if let Some(status) = behaviour.expect.status {
            if !(100..=599).contains(&status) {
                issues.push(ScenarioIssue::new(
                    "invalid-status",
                    format!("Behaviour {} expects invalid status {}", label, status),
                    Some(index),
                ));
            }
        }
    }

    issues
}

fn validate_settings(scenario: &ScenarioConfig) -> Vec<ScenarioIssue> {
    let settings = &scenario.settings;
    settings
        .base_url
        .iter()
        .chain(settings.headers.values())
        .flat_map(|template| validate_references(template, true, "Settings", None))
        .collect()
}

fn validate_references(
    template: &str,
    forbid_previous: bool,
    owner: &str,
    behaviour: Option<usize>,
) -> Vec<ScenarioIssue> {
    let mut issues = Vec::new();
    let mut names: Vec<_> = extract_variables(template).into_iter().collect();
    names.sort();

    for name in names {
        match Reference::parse(&name) {
            None => issues.push(ScenarioIssue::new(
                "invalid-reference",
                format!("{} uses unknown reference ${{{}}}", owner, name),
                behaviour,
            )),
            Some(reference) if forbid_previous && reference.needs_previous() => {
                issues.push(ScenarioIssue::new(
                    "no-previous-response",
                    format!(
                        "{} references ${{{}}} but has no previous response",
                        owner, name
                    ),
                    behaviour,
                ))
            }
            Some(_) => {}
        }
    }

    issues
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ScenarioValidationError` if any validation rules fail.
pub fn validate(scenario: &ScenarioConfig) -> Result<()> {
    let issues = validate_scenario(scenario);

    if issues.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = issues.iter().map(|e| e.message.clone()).collect();
        Err(HarnessError::ScenarioValidationError {
            message: messages.join("; "),
        })
    }
}
