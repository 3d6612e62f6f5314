use anyhow::Context;
use confguard_types::{RunEnvelope, RunReport, ToolMeta, Verdict};

/// Build the machine-readable envelope for one finished run.
pub fn build_envelope(report: &RunReport, verdict: Verdict) -> RunEnvelope {
    RunEnvelope {
        tool: ToolMeta {
            name: "confguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        verdict,
        sources: report.sources.clone(),
    }
}

pub fn serialize_report(envelope: &RunEnvelope) -> anyhow::Result<String> {
    serde_json::to_string_pretty(envelope).context("serialize report")
}

/// Map verdict to exit code: 0 = pass/warn, 1 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass | Verdict::Warn => 0,
        Verdict::Fail => 1,
    }
}
