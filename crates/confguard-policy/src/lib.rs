//! The rule engine shipped with confguard.
//!
//! Rule sources are YAML files with the `.policy` extension. A source file
//! declares a namespace and a list of named rules; each rule has a condition
//! over the input document and a message template. Sources compile into an
//! immutable [`PolicySet`] which implements the orchestration core's
//! [`Engine`](confguard_domain::Engine) trait, so the rest of the pipeline
//! never depends on this crate's rule format.

pub mod compile;
pub mod error;
pub mod eval;
pub mod path;
pub mod source;
pub mod template;

pub use compile::{PolicySet, SOURCE_EXTENSION};
pub use error::PolicyError;
pub use eval::Query;
