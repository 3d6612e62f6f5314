use anyhow::Context;
use camino::Utf8Path;
use serde_json::Value;

/// Input format, selected purely by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Select a decoder for a path. Unknown extensions (and the standard
    /// input token) decode as YAML.
    pub fn for_path(path: &str) -> Self {
        match Utf8Path::new(path).extension() {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    /// Decode one sub-document into a structured value.
    ///
    /// Empty or whitespace-only content decodes to null, so a leading
    /// separator line (empty first sub-document) is harmless.
    pub fn decode(self, content: &[u8]) -> anyhow::Result<Value> {
        if content.trim_ascii().is_empty() {
            return Ok(Value::Null);
        }
        match self {
            Self::Yaml => {
                let text = std::str::from_utf8(content).context("input is not valid UTF-8")?;
                serde_yaml_ng::from_str(text).context("parse YAML document")
            }
            Self::Json => serde_json::from_slice(content).context("parse JSON document"),
            Self::Toml => {
                let text = std::str::from_utf8(content).context("input is not valid UTF-8")?;
                toml::from_str(text).context("parse TOML document")
            }
        }
    }
}
