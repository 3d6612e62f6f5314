//! The driver use case: wire inputs, rule set, evaluation, and rendering
//! into one run with a single verdict.

pub mod refresh;
pub mod report;
pub mod run;

pub use refresh::SourceRefresher;
pub use report::{build_envelope, serialize_report, verdict_exit_code};
pub use run::{COMBINED_SOURCE, RunInput, RunOutput, execute};
