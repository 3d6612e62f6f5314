use serde_json::Value;
use thiserror::Error;

/// Result of evaluating one fully-qualified query against one document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evaluation {
    /// Expression values, one per result binding, in engine order. A binding
    /// holding a sequence is a rule's reported messages.
    pub bindings: Vec<Value>,
    /// Human-readable execution trace; empty unless tracing was requested.
    pub trace: Vec<String>,
}

/// Errors raised by the engine itself, as opposed to messages reported by
/// rules that fired. These are surfaced per query and never abort a run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The query string does not name `data.<namespace>.<rule>`.
    #[error("malformed query '{0}'")]
    MalformedQuery(String),

    /// A rule applied an operator to a value of the wrong type.
    #[error("type error: {0}")]
    Type(String),

    /// Any other failure to execute the rule.
    #[error("evaluation error: {0}")]
    Evaluation(String),
}

/// The evaluation-engine collaborator.
///
/// An implementation owns a compiled, immutable rule set. Evaluation takes
/// `&self`: the rule set is shared read-only across every document in a run.
pub trait Engine {
    /// Bare rule names, fully ordered: modules in load order, rules in
    /// declaration order within each module.
    fn rule_names(&self) -> Vec<String>;

    /// Evaluate a fully-qualified query (`data.<namespace>.<rule>`) against
    /// one decoded document. `trace` requests a human-readable execution
    /// trace in the returned [`Evaluation`].
    fn eval(&self, query: &str, input: &Value, trace: bool) -> Result<Evaluation, EngineError>;
}
