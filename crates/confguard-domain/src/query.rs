use crate::engine::{Engine, Evaluation};
use confguard_types::Violation;
use serde_json::Value;
use std::io::Write;

/// Namespace queried when none is configured.
pub const DEFAULT_NAMESPACE: &str = "main";

/// Build the fully-qualified form of a rule name for submission to the
/// engine.
pub fn make_query(namespace: &str, rule: &str) -> String {
    format!("data.{namespace}.{rule}")
}

/// Evaluate one query against one document, collecting every reported
/// message as an individual violation.
///
/// An engine-level error becomes a single engine-error violation for this
/// query; it never aborts the caller's scan. On success, each sequence-valued
/// binding contributes one violation per element; a non-text element breaks
/// the engine's data contract and is surfaced as an engine error too.
/// Non-sequence bindings carry no messages and are skipped.
///
/// When `trace_sink` is supplied the engine's execution trace is written to
/// it regardless of outcome. Trace output is best-effort; sink errors are
/// ignored.
pub fn run_query(
    engine: &dyn Engine,
    query: &str,
    input: &Value,
    trace_sink: Option<&mut dyn Write>,
) -> Vec<Violation> {
    let trace_enabled = trace_sink.is_some();

    let Evaluation { bindings, trace } = match engine.eval(query, input, trace_enabled) {
        Ok(evaluation) => evaluation,
        Err(err) => {
            return vec![Violation::engine_error(
                query,
                format!("error evaluating {query}: {err}"),
            )];
        }
    };

    if let Some(sink) = trace_sink {
        for line in &trace {
            let _ = writeln!(sink, "{line}");
        }
    }

    let mut violations = Vec::new();
    for binding in bindings {
        let Value::Array(messages) = binding else {
            continue;
        };
        for message in messages {
            match message {
                Value::String(text) => violations.push(Violation::reported(query, text)),
                other => violations.push(Violation::engine_error(
                    query,
                    format!("{query} reported a non-text message: {other}"),
                )),
            }
        }
    }
    violations
}
