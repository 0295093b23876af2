//! Fixture execution engine.

use bfmt_core::{FormatContext, Value};
use serde::{Deserialize, Serialize};

use crate::fixtures::{FixtureCase, FixtureSet};

/// Default per-case output buffer length, terminator byte included.
pub const DEFAULT_BUFFER_LEN: usize = 1024;

/// One executed case with its observed output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

/// Runs fixture sets against the formatting engine.
pub struct TestRunner {
    /// Output buffer length per case; cases exercising truncation shrink it.
    pub buffer_len: usize,
    context: FormatContext,
}

impl TestRunner {
    /// Runner with the default buffer and an empty custom type registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(FormatContext::new())
    }

    /// Runner formatting through `context`, so fixture sets can exercise
    /// registered custom types.
    #[must_use]
    pub fn with_context(context: FormatContext) -> Self {
        Self {
            buffer_len: DEFAULT_BUFFER_LEN,
            context,
        }
    }

    /// Run all cases in a set and collect their outcomes.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<CaseOutcome> {
        fixture_set
            .cases
            .iter()
            .map(|case| self.run_case(case))
            .collect()
    }

    /// Run a single case.
    pub fn run_case(&self, case: &FixtureCase) -> CaseOutcome {
        let args: Vec<Value<'_>> = case.args.iter().map(|arg| arg.to_value()).collect();
        let mut out = vec![0u8; self.buffer_len];
        let n = self.context.format(&case.template, &mut out, &args);
        let actual = String::from_utf8_lossy(&out[..n]).into_owned();
        CaseOutcome {
            name: case.name.clone(),
            passed: actual == case.expected,
            expected: case.expected.clone(),
            actual,
        }
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}
