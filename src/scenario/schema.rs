//! Scenario file schema.
//!
//! These structs map to the YAML scenario format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root structure of a scenario file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Scenario name (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Settings shared by every behaviour
    pub settings: Settings,

    /// Behaviours in execution order
    pub behaviours: Vec<BehaviourConfig>,
}

/// Settings that apply to every behaviour in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix for request URLs that are not absolute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Transport timeout for the HTTP runner
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Headers sent with every request (behaviour headers win)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            headers: BTreeMap::new(),
        }
    }
}

/// One declared behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviourConfig {
    /// Human-readable label
    pub description: String,

    /// Request template
    pub request: RequestConfig,

    /// Expectations on the outcome
    pub expect: ExpectConfig,
}

/// Request template. Every string may contain `${...}` references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// HTTP method
    #[serde(default = "default_method")]
    pub method: String,

    /// Absolute URL, or a path joined to `settings.base_url`
    pub url: String,

    /// Request headers
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Request body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            url: String::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }
}

/// Expectations on the dispatch outcome.
///
/// With no `status`, any 2xx status passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectConfig {
    /// Exact status code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Substrings the body must contain
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body_contains: Vec<String>,

    /// Headers that must be present with these exact values
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub header: BTreeMap<String, String>,

    /// Pass only if dispatch itself fails
    #[serde(skip_serializing_if = "is_false")]
    pub dispatch_error: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}
