//! The YAML schema for `.policy` rule source files.

use serde::Deserialize;

/// Returns the default value `true` for serde.
const fn default_true() -> bool {
    true
}

fn default_namespace() -> String {
    confguard_domain::DEFAULT_NAMESPACE.to_string()
}

/// One rule source file: a namespace and its rules.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    /// Namespace the file's rules are qualified under. Defaults to `main`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// The rules declared by this file, in evaluation order.
    pub rules: Vec<RuleSpec>,
}

/// A single rule as written in YAML. The name decides how the orchestrator
/// classifies it (`deny`/`deny_*` vs `warn`/`warn_*`); anything else compiles
/// but is never queried by the test pipeline.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    pub name: String,
    /// Optional description of what this rule enforces.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the rule is active. Defaults to `true`.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// The condition that must hold for the rule to fire.
    pub when: ConditionSpec,
    /// Message template reported when the rule fires. May interpolate
    /// `{{ field.path }}` from the input document.
    pub message: String,
}

/// A condition expression that can combine multiple predicates.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ConditionSpec {
    /// All sub-predicates must hold (logical AND).
    All { all: Vec<PredicateSpec> },
    /// At least one sub-predicate must hold (logical OR).
    Any { any: Vec<PredicateSpec> },
    /// A single predicate used directly as a condition.
    Single(Box<PredicateSpec>),
}

/// A single predicate within a condition.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PredicateSpec {
    /// Check a field of the input document against one or more operators.
    FieldCheck {
        /// Dot-separated field path (e.g. `spec.template.spec.privileged`).
        field: String,
        /// The comparison operators to apply.
        #[serde(flatten)]
        op: FieldOpSpec,
    },
    /// A nested condition (allows recursive `all` / `any` grouping).
    Nested(Box<ConditionSpec>),
}

/// Which comparison operators to apply to a field value.
///
/// At least one must be set; when several are set they are combined with
/// logical AND during compilation.
#[derive(Debug, Default, Deserialize)]
pub struct FieldOpSpec {
    /// Equals comparison.
    pub eq: Option<serde_json::Value>,
    /// Not-equals comparison.
    pub ne: Option<serde_json::Value>,
    /// Greater-than comparison (numbers).
    pub gt: Option<serde_json::Value>,
    /// Less-than comparison (numbers).
    pub lt: Option<serde_json::Value>,
    /// Greater-than-or-equal comparison (numbers).
    pub gte: Option<serde_json::Value>,
    /// Less-than-or-equal comparison (numbers).
    pub lte: Option<serde_json::Value>,
    /// String contains check.
    pub contains: Option<String>,
    /// String starts-with check.
    pub starts_with: Option<String>,
    /// String ends-with check.
    pub ends_with: Option<String>,
    /// Regex match check (compiled once at rule-set build).
    pub matches: Option<String>,
    /// Field presence check.
    pub exists: Option<bool>,
}
