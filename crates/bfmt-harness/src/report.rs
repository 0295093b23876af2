//! Machine-readable conformance reports.

use serde::{Deserialize, Serialize};

use crate::HarnessError;
use crate::runner::CaseOutcome;

/// Report summary counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub pass_rate_percent: f64,
}

/// Top-level conformance report payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub schema_version: String,
    pub family: String,
    pub summary: ReportSummary,
    pub cases: Vec<CaseOutcome>,
}

impl ConformanceReport {
    /// Build a deterministic report: cases sort by name, counters saturate.
    #[must_use]
    pub fn build(family: &str, mut outcomes: Vec<CaseOutcome>) -> Self {
        outcomes.sort_by(|a, b| a.name.cmp(&b.name));

        let total = u64::try_from(outcomes.len()).unwrap_or(u64::MAX);
        let passed =
            u64::try_from(outcomes.iter().filter(|case| case.passed).count()).unwrap_or(0);
        let failed = total.saturating_sub(passed);

        Self {
            schema_version: "v1".to_string(),
            family: family.to_string(),
            summary: ReportSummary {
                total,
                passed,
                failed,
                pass_rate_percent: ratio_percent(passed, total),
            },
            cases: outcomes,
        }
    }

    /// True when every case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.summary.failed == 0
    }

    /// Names and outputs of the failing cases, for assertion messages.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.cases.iter().filter(|case| !case.passed)
    }

    /// Serialize the report to pretty JSON.
    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn ratio_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        100.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}
