use crate::model::ConfguardConfigV1;
use anyhow::Context;
use camino::Utf8PathBuf;
use confguard_domain::DEFAULT_NAMESPACE;
use confguard_types::FailOn;

/// CLI-side overrides. Boolean flags are additive: a flag set on the command
/// line enables the behavior even when the config file leaves it off.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub policy: Option<Utf8PathBuf>,
    pub namespace: Option<String>,
    pub combine: bool,
    pub fail_on_warn: bool,
    pub update: bool,
    pub trace: bool,
    pub no_color: bool,
    pub output: Option<String>,
}

/// Output rendering selected for the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The fully-resolved configuration handed to the driver and aggregator.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub policy: Utf8PathBuf,
    pub namespace: String,
    pub combine: bool,
    pub fail_on: FailOn,
    pub update: bool,
    pub trace: bool,
    pub color: bool,
    pub output: OutputFormat,
}

pub fn parse_config_toml(text: &str) -> anyhow::Result<ConfguardConfigV1> {
    toml::from_str(text).context("parse confguard.toml")
}

pub fn resolve_config(cfg: ConfguardConfigV1, overrides: Overrides) -> anyhow::Result<RunConfig> {
    let policy = overrides
        .policy
        .or_else(|| cfg.policy.map(Utf8PathBuf::from))
        .unwrap_or_else(|| Utf8PathBuf::from("policy"));

    let namespace = overrides
        .namespace
        .or(cfg.namespace)
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

    let fail_on = if overrides.fail_on_warn || cfg.fail_on_warn.unwrap_or(false) {
        FailOn::Warning
    } else {
        FailOn::Failure
    };

    let output = match overrides.output.or(cfg.output).as_deref() {
        None | Some("text") => OutputFormat::Text,
        Some("json") => OutputFormat::Json,
        Some(other) => anyhow::bail!("unknown output format: {other} (expected text|json)"),
    };

    Ok(RunConfig {
        policy,
        namespace,
        combine: overrides.combine || cfg.combine.unwrap_or(false),
        fail_on,
        update: overrides.update,
        trace: overrides.trace || cfg.trace.unwrap_or(false),
        color: !(overrides.no_color || cfg.no_color.unwrap_or(false)),
        output,
    })
}
