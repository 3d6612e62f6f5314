//! Pure policy-evaluation orchestration: rule classification, query
//! execution, and per-document aggregation.
//!
//! This crate never touches the filesystem. The evaluation engine is injected
//! through the [`Engine`] trait and the only output is an optional trace sink
//! supplied by the caller.

pub mod aggregate;
pub mod classify;
pub mod engine;
pub mod query;

pub use aggregate::{EvalOptions, evaluate_document};
pub use classify::{Classification, classify};
pub use engine::{Engine, EngineError, Evaluation};
pub use query::{DEFAULT_NAMESPACE, make_query, run_query};
