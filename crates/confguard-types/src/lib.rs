//! Stable DTOs shared across the confguard workspace.
//!
//! This crate is intentionally boring:
//! - violation and report data types
//! - verdict computation over an accumulated run

#![forbid(unsafe_code)]

pub mod report;

pub use report::{
    DocumentReport, FailOn, RunEnvelope, RunReport, SourceReport, ToolMeta, Verdict, Violation,
    ViolationKind,
};
