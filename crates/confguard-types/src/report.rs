use serde::{Deserialize, Serialize};

/// Distinguishes rule-reported messages from the engine failing to evaluate
/// a query at all. Engine errors are kept inside the aggregation so they stay
/// visible, but renderers must be able to tell them apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    RuleReported,
    EngineError,
}

/// One failure or warning instance produced by evaluating a single query
/// against a single document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Fully-qualified query that produced this violation.
    pub query: String,
    pub message: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn reported(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            message: message.into(),
            kind: ViolationKind::RuleReported,
        }
    }

    pub fn engine_error(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            message: message.into(),
            kind: ViolationKind::EngineError,
        }
    }
}

/// Aggregated outcome of evaluating one logical document against the whole
/// rule set.
///
/// Empty vectors are the "no failure" / "no warning" state; callers branch on
/// [`has_failures`](Self::has_failures) and [`has_warnings`](Self::has_warnings)
/// rather than on list length.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub failures: Vec<Violation>,
    pub warnings: Vec<Violation>,
}

impl DocumentReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_failures() && !self.has_warnings()
    }

    /// Append another report's violations, preserving discovery order.
    pub fn merge(&mut self, other: DocumentReport) {
        self.failures.extend(other.failures);
        self.warnings.extend(other.warnings);
    }
}

/// The report for one source unit: a file path, `-` for standard input, or
/// the synthetic `combined` label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: String,
    #[serde(flatten)]
    pub report: DocumentReport,
}

/// Accumulated run state, one entry per source unit in evaluation order.
/// Per-source detail is retained; the verdict is derived, never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub sources: Vec<SourceReport>,
}

impl RunReport {
    pub fn push(&mut self, source: impl Into<String>, report: DocumentReport) {
        self.sources.push(SourceReport {
            source: source.into(),
            report,
        });
    }

    pub fn has_failures(&self) -> bool {
        self.sources.iter().any(|s| s.report.has_failures())
    }

    pub fn has_warnings(&self) -> bool {
        self.sources.iter().any(|s| s.report.has_warnings())
    }

    pub fn verdict(&self, fail_on: FailOn) -> Verdict {
        if self.has_failures() {
            return Verdict::Fail;
        }
        if self.has_warnings() {
            return match fail_on {
                FailOn::Warning => Verdict::Fail,
                FailOn::Failure => Verdict::Warn,
            };
        }
        Verdict::Pass
    }
}

/// When to fail the run: on failures only (default) or on warnings too.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailOn {
    #[default]
    Failure,
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Envelope for machine-readable output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunEnvelope {
    pub tool: ToolMeta,
    pub verdict: Verdict,
    pub sources: Vec<SourceReport>,
}
