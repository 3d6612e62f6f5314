use crate::classify::Classification;
use crate::engine::Engine;
use crate::query::{make_query, run_query};
use confguard_types::DocumentReport;
use serde_json::Value;
use std::io::Write;

/// Per-run evaluation knobs threaded from the resolved configuration.
#[derive(Clone, Copy, Debug)]
pub struct EvalOptions<'a> {
    /// Namespace used to qualify every rule name.
    pub namespace: &'a str,
    /// Emit the engine's execution trace to the sink.
    pub trace: bool,
}

/// Evaluate one decoded document against every classified rule.
///
/// Warning rules run first, then failure rules. Every rule is attempted:
/// an engine error on one query lands in the report as an engine-error
/// violation and the scan moves on to the next rule.
pub fn evaluate_document(
    engine: &dyn Engine,
    classification: &Classification,
    input: &Value,
    opts: EvalOptions<'_>,
    sink: &mut dyn Write,
) -> DocumentReport {
    let mut report = DocumentReport::default();

    for rule in &classification.warnings {
        let query = make_query(opts.namespace, rule);
        let trace_sink = opts.trace.then_some(&mut *sink as &mut dyn Write);
        report
            .warnings
            .extend(run_query(engine, &query, input, trace_sink));
    }

    for rule in &classification.failures {
        let query = make_query(opts.namespace, rule);
        let trace_sink = opts.trace.then_some(&mut *sink as &mut dyn Write);
        report
            .failures
            .extend(run_query(engine, &query, input, trace_sink));
    }

    report
}
