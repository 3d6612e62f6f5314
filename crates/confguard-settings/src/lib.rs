//! Run configuration: the user-facing `confguard.toml` model and its
//! resolution, together with CLI overrides, into one explicit [`RunConfig`]
//! that the driver and aggregator receive. No process-global state.

pub mod model;
pub mod resolve;

pub use model::ConfguardConfigV1;
pub use resolve::{OutputFormat, Overrides, RunConfig, parse_config_toml, resolve_config};
