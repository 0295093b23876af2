//! Structured JSONL logging for conformance runs.
//!
//! One [`LogEntry`] per executed case, one JSON object per line, so run
//! output can be aggregated with the same tooling regardless of where the
//! run happened.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::HarnessError;
use crate::runner::CaseOutcome;

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Case outcome kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

/// Canonical JSONL record for one executed case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub family: String,
    pub case: String,
    pub outcome: Outcome,
    /// Expected-vs-actual detail, present only on failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LogEntry {
    /// Entry describing a runner outcome; failures log at error level with
    /// an expected-vs-actual detail string.
    #[must_use]
    pub fn from_outcome(family: &str, outcome: &CaseOutcome) -> Self {
        if outcome.passed {
            Self {
                level: LogLevel::Info,
                family: family.to_string(),
                case: outcome.name.clone(),
                outcome: Outcome::Pass,
                detail: None,
            }
        } else {
            Self {
                level: LogLevel::Error,
                family: family.to_string(),
                case: outcome.name.clone(),
                outcome: Outcome::Fail,
                detail: Some(format!(
                    "expected {:?}, got {:?}",
                    outcome.expected, outcome.actual
                )),
            }
        }
    }
}

/// Writes JSONL records to any byte sink.
pub struct LogEmitter<W: Write> {
    sink: W,
}

impl<W: Write> LogEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Serialize one entry and write it as a single line.
    pub fn emit(&mut self, entry: &LogEntry) -> Result<(), HarnessError> {
        let line = serde_json::to_string(entry)?;
        self.sink.write_all(line.as_bytes())?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }

    /// Recover the sink, flushing first.
    pub fn into_inner(mut self) -> Result<W, HarnessError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}
