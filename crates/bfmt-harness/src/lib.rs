//! Conformance testing harness for bfmt-core.
//!
//! This crate provides:
//! - Fixture corpus: template/argument/expected-output triples as JSON
//! - Runner: execute fixture cases against the formatting engine
//! - Report generation: machine-readable conformance reports
//! - Structured logging: JSONL records for per-case outcomes

#![forbid(unsafe_code)]

pub mod fixtures;
pub mod log;
pub mod report;
pub mod runner;

pub use fixtures::{FixtureArg, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::{CaseOutcome, TestRunner};

use thiserror::Error;

/// Errors surfaced while loading fixtures or emitting records.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("fixture I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture JSON was malformed: {0}")]
    Json(#[from] serde_json::Error),
}
