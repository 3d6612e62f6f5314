//! The `test` use case: evaluate input documents against the rule set.

use crate::refresh::SourceRefresher;
use anyhow::Context;
use camino::Utf8PathBuf;
use confguard_domain::{Engine, EvalOptions, classify, evaluate_document};
use confguard_input::read::STDIN_TOKEN;
use confguard_input::{Format, combine_files, read_input, split_documents};
use confguard_policy::PolicySet;
use confguard_render::{RenderOptions, write_failures, write_source_header, write_warnings};
use confguard_settings::{OutputFormat, RunConfig};
use confguard_types::{DocumentReport, RunReport, Verdict};
use std::io::Write;

/// Synthetic source label used for combined-mode output.
pub const COMBINED_SOURCE: &str = "combined";

/// Input for the test use case.
#[derive(Clone, Debug)]
pub struct RunInput<'a> {
    /// Input files in evaluation order; `-` selects standard input.
    pub files: &'a [String],
    /// Fully-resolved configuration.
    pub config: &'a RunConfig,
}

/// Output from the test use case.
#[derive(Clone, Debug)]
pub struct RunOutput {
    pub report: RunReport,
    pub verdict: Verdict,
}

/// Run the policy tests.
///
/// Violations are rendered to `out` as each source unit completes, so a slow
/// scan still reports early files immediately. Rule-set build failures,
/// unreadable inputs, and undecodable documents are errors; rule-reported
/// findings and engine evaluation errors only shape the verdict.
pub fn execute(
    input: RunInput<'_>,
    refresher: Option<&dyn SourceRefresher>,
    out: &mut dyn Write,
) -> anyhow::Result<RunOutput> {
    anyhow::ensure!(!input.files.is_empty(), "at least one input file is required");

    let config = input.config;
    if config.update {
        match refresher {
            Some(refresher) => refresher
                .refresh(&config.policy)
                .context("refresh policy sources")?,
            None => tracing::warn!("no source refresher configured; skipping policy update"),
        }
    }

    let policy = PolicySet::load(&config.policy)
        .with_context(|| format!("build rule set from {}", config.policy))?;
    let classification = classify(&policy.rule_names());
    tracing::debug!(
        failures = classification.failures.len(),
        warnings = classification.warnings.len(),
        "classified rule set"
    );

    let opts = EvalOptions {
        namespace: &config.namespace,
        trace: config.trace,
    };
    let render = RenderOptions {
        color: config.color,
    };
    let text = config.output == OutputFormat::Text;

    let mut report = RunReport::default();

    if config.combine {
        let paths: Vec<Utf8PathBuf> = input.files.iter().map(Utf8PathBuf::from).collect();
        let combined = combine_files(&paths).context("combine input files")?;
        // Combined input is always treated as YAML, whatever the sources
        // were named.
        let value = Format::Yaml
            .decode(&combined)
            .context("decode combined document")?;
        let document = evaluate_document(&policy, &classification, &value, opts, out);
        if text {
            write_failures(out, &document.failures, render)?;
            write_warnings(out, &document.warnings, render)?;
        }
        report.push(COMBINED_SOURCE, document);
    } else {
        for file in input.files {
            if file != STDIN_TOKEN && text {
                write_source_header(out, file)?;
            }
            let raw = read_input(file)?;
            let format = Format::for_path(file);

            let mut file_report = DocumentReport::default();
            for sub_document in split_documents(&raw) {
                let value = format
                    .decode(sub_document)
                    .with_context(|| format!("decode document from {file}"))?;
                file_report.merge(evaluate_document(
                    &policy,
                    &classification,
                    &value,
                    opts,
                    out,
                ));
            }
            if text {
                write_failures(out, &file_report.failures, render)?;
                write_warnings(out, &file_report.warnings, render)?;
            }
            report.push(file.as_str(), file_report);
        }
    }

    let verdict = report.verdict(config.fail_on);
    Ok(RunOutput { report, verdict })
}
