use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading or compiling rule sources.
///
/// Any of these aborts the build; a partial rule set is never produced.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A rule source file or directory could not be read.
    #[error("cannot read policy source {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rule source is not valid YAML for the rule schema.
    #[error("parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// A rule parsed but fails validation (bad operand, empty predicate,
    /// invalid regex, invalid message template).
    #[error("invalid rule '{name}' in {file}: {message}")]
    Rule {
        file: String,
        name: String,
        message: String,
    },

    /// The same fully-qualified rule name is defined in two source files.
    #[error("duplicate rule '{name}': defined in both {first} and {second}")]
    DuplicateRule {
        name: String,
        first: String,
        second: String,
    },
}
