//! Fixture loading and management.

use bfmt_core::Value;
use serde::{Deserialize, Serialize};

use crate::HarnessError;

/// One argument slot in a fixture case.
///
/// The special float spellings exist because JSON numbers cannot encode
/// NaN or the infinities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureArg {
    Null,
    Int(i32),
    Long(i64),
    Size(usize),
    Float(f64),
    Nan,
    Inf,
    NegInf,
    Str(String),
}

impl FixtureArg {
    /// Engine-level view of this argument.
    pub fn to_value(&self) -> Value<'_> {
        match self {
            FixtureArg::Null => Value::Null,
            FixtureArg::Int(v) => Value::Int(*v),
            FixtureArg::Long(v) => Value::Long(*v),
            FixtureArg::Size(v) => Value::Size(*v),
            FixtureArg::Float(v) => Value::Float(*v),
            FixtureArg::Nan => Value::Float(f64::NAN),
            FixtureArg::Inf => Value::Float(f64::INFINITY),
            FixtureArg::NegInf => Value::Float(f64::NEG_INFINITY),
            FixtureArg::Str(s) => Value::Str(s),
        }
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Template handed to the engine.
    pub template: String,
    /// Argument slots, in order.
    pub args: Vec<FixtureArg>,
    /// Expected output bytes, as UTF-8.
    pub expected: String,
}

/// A collection of fixture cases for one behavior family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Behavior family name.
    pub family: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load a fixture set from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, HarnessError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the fixture set to pretty JSON.
    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// The corpus shipped with the crate, covering the whole specifier grammar.
pub fn builtin_corpus() -> Result<FixtureSet, HarnessError> {
    FixtureSet::from_json(include_str!("../fixtures/format_cases.json"))
}
