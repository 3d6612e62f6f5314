//! Query evaluation against a compiled [`PolicySet`].

use crate::compile::{Condition, FieldOp, PolicySet, Predicate};
use crate::path::{kind_name, lookup};
use confguard_domain::{Engine, EngineError, Evaluation};
use serde_json::Value;

/// A parsed fully-qualified query: `data.<namespace>.<rule>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Query<'a> {
    pub namespace: &'a str,
    pub rule: &'a str,
}

impl<'a> Query<'a> {
    pub fn parse(raw: &'a str) -> Result<Self, EngineError> {
        let malformed = || EngineError::MalformedQuery(raw.to_string());
        let rest = raw.strip_prefix("data.").ok_or_else(malformed)?;
        let (namespace, rule) = rest.rsplit_once('.').ok_or_else(malformed)?;
        if namespace.is_empty() || rule.is_empty() {
            return Err(malformed());
        }
        Ok(Self { namespace, rule })
    }
}

/// Trace accumulator; a no-op unless tracing was requested.
struct Tracer {
    lines: Option<Vec<String>>,
}

impl Tracer {
    fn new(enabled: bool) -> Self {
        Self {
            lines: enabled.then(Vec::new),
        }
    }

    fn note(&mut self, line: impl FnOnce() -> String) {
        if let Some(lines) = &mut self.lines {
            lines.push(line());
        }
    }

    fn finish(self) -> Vec<String> {
        self.lines.unwrap_or_default()
    }
}

impl PolicySet {
    /// Evaluate one fully-qualified query against one document.
    ///
    /// A query that names no compiled rule is undefined: it yields zero
    /// bindings, not an error. A rule that fires yields a single binding
    /// whose value is the sequence of reported messages.
    pub fn eval(
        &self,
        raw_query: &str,
        input: &Value,
        trace: bool,
    ) -> Result<Evaluation, EngineError> {
        let query = Query::parse(raw_query)?;
        let mut tracer = Tracer::new(trace);
        tracer.note(|| format!("Enter {raw_query}"));

        let Some(rule) = self.find(query.namespace, query.rule) else {
            tracer.note(|| {
                format!(
                    "| Undefined: no rule '{}' in namespace '{}'",
                    query.rule, query.namespace
                )
            });
            tracer.note(|| format!("Exit {raw_query}"));
            return Ok(Evaluation {
                bindings: Vec::new(),
                trace: tracer.finish(),
            });
        };

        let matched = eval_condition(&rule.when, input, &mut tracer)?;
        let bindings = if matched {
            match rule.message.render(input) {
                Some(message) => {
                    tracer.note(|| format!("| Fire: {message}"));
                    vec![Value::Array(vec![Value::String(message)])]
                }
                None => {
                    // Undefined interpolation: the rule stays silent for this
                    // input, mirroring undefined propagation in the condition.
                    tracer.note(|| "| Undefined: message references a missing field".to_string());
                    Vec::new()
                }
            }
        } else {
            tracer.note(|| "| No match".to_string());
            Vec::new()
        };

        tracer.note(|| format!("Exit {raw_query}"));
        Ok(Evaluation {
            bindings,
            trace: tracer.finish(),
        })
    }
}

impl Engine for PolicySet {
    fn rule_names(&self) -> Vec<String> {
        self.modules
            .iter()
            .flat_map(|module| module.rules.iter().map(|rule| rule.name.clone()))
            .collect()
    }

    fn eval(&self, query: &str, input: &Value, trace: bool) -> Result<Evaluation, EngineError> {
        PolicySet::eval(self, query, input, trace)
    }
}

fn eval_condition(
    condition: &Condition,
    input: &Value,
    tracer: &mut Tracer,
) -> Result<bool, EngineError> {
    match condition {
        Condition::All(predicates) => {
            for predicate in predicates {
                if !eval_predicate(predicate, input, tracer)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Condition::Any(predicates) => {
            for predicate in predicates {
                if eval_predicate(predicate, input, tracer)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn eval_predicate(
    predicate: &Predicate,
    input: &Value,
    tracer: &mut Tracer,
) -> Result<bool, EngineError> {
    match predicate {
        Predicate::Nested(condition) => eval_condition(condition, input, tracer),
        Predicate::Field { path, ops } => {
            let value = lookup(input, path);
            for op in ops {
                let hit = eval_op(op, value, path)?;
                tracer.note(|| format!("| Eval {} {} => {hit}", path.join("."), describe(op)));
                if !hit {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

fn eval_op(op: &FieldOp, value: Option<&Value>, path: &[String]) -> Result<bool, EngineError> {
    match op {
        FieldOp::Exists(expected) => Ok(value.is_some() == *expected),
        FieldOp::Eq(want) => Ok(value.is_some_and(|v| v == want)),
        FieldOp::Ne(want) => Ok(value.is_some_and(|v| v != want)),
        FieldOp::Gt(want) => Ok(number_at(value, path, "gt")?.is_some_and(|n| n > *want)),
        FieldOp::Lt(want) => Ok(number_at(value, path, "lt")?.is_some_and(|n| n < *want)),
        FieldOp::Gte(want) => Ok(number_at(value, path, "gte")?.is_some_and(|n| n >= *want)),
        FieldOp::Lte(want) => Ok(number_at(value, path, "lte")?.is_some_and(|n| n <= *want)),
        FieldOp::Contains(needle) => {
            Ok(text_at(value, path, "contains")?.is_some_and(|s| s.contains(needle)))
        }
        FieldOp::StartsWith(prefix) => {
            Ok(text_at(value, path, "starts_with")?.is_some_and(|s| s.starts_with(prefix)))
        }
        FieldOp::EndsWith(suffix) => {
            Ok(text_at(value, path, "ends_with")?.is_some_and(|s| s.ends_with(suffix)))
        }
        FieldOp::Matches(pattern) => {
            Ok(text_at(value, path, "matches")?.is_some_and(|s| pattern.is_match(s)))
        }
    }
}

/// A missing field is undefined (`None`, never an error); a present field of
/// the wrong type is a type error.
fn number_at(
    value: Option<&Value>,
    path: &[String],
    op: &str,
) -> Result<Option<f64>, EngineError> {
    match value {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(EngineError::Type(format!(
            "{op} requires a number at '{}', got {}",
            path.join("."),
            kind_name(other)
        ))),
    }
}

fn text_at<'v>(
    value: Option<&'v Value>,
    path: &[String],
    op: &str,
) -> Result<Option<&'v str>, EngineError> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(EngineError::Type(format!(
            "{op} requires a text value at '{}', got {}",
            path.join("."),
            kind_name(other)
        ))),
    }
}

fn describe(op: &FieldOp) -> String {
    match op {
        FieldOp::Eq(want) => format!("eq {want}"),
        FieldOp::Ne(want) => format!("ne {want}"),
        FieldOp::Gt(want) => format!("gt {want}"),
        FieldOp::Lt(want) => format!("lt {want}"),
        FieldOp::Gte(want) => format!("gte {want}"),
        FieldOp::Lte(want) => format!("lte {want}"),
        FieldOp::Contains(needle) => format!("contains {needle:?}"),
        FieldOp::StartsWith(prefix) => format!("starts_with {prefix:?}"),
        FieldOp::EndsWith(suffix) => format!("ends_with {suffix:?}"),
        FieldOp::Matches(pattern) => format!("matches /{}/", pattern.as_str()),
        FieldOp::Exists(expected) => format!("exists {expected}"),
    }
}
