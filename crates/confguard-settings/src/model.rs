use serde::{Deserialize, Serialize};

/// `confguard.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional so a partial
/// file composes with the defaults and CLI flags.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfguardConfigV1 {
    /// Rule source file or directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,

    /// Namespace used to qualify rule queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Merge all input files into one document before evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combine: Option<bool>,

    /// Return a non-zero exit code when only warnings are found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on_warn: Option<bool>,

    /// Emit the engine's execution trace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<bool>,

    /// Disable ANSI colors in text output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_color: Option<bool>,

    /// Output rendering: `text` (default) or `json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}
