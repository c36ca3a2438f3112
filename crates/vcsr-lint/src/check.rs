//! # Quality Check Trait
//!
//! Each dimension is scored by one [`QualityCheck`]. A check is a pure
//! function of the parsed document and its path: no I/O, no shared state.
//! Checks never fail. Absent or mistyped paths simply score lower.

use std::fmt;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use vcsr_core::{Dimension, Issue, SchemaView};

/// Input to a check.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// The document under assessment.
    pub document: SchemaView<'a>,
    /// Schema path as given by the caller; copied onto every issue.
    pub schema_path: &'a str,
    /// Final path component of `schema_path`.
    pub file_name: &'a str,
}

impl<'a> CheckContext<'a> {
    pub fn new(document: &'a Value, schema_path: &'a str) -> Self {
        let file_name = Path::new(schema_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(schema_path);
        Self {
            document: SchemaView::new(document),
            schema_path,
            file_name,
        }
    }
}

/// A scoring rule for one quality dimension.
pub trait QualityCheck: Send + Sync + fmt::Debug {
    /// The dimension this check scores.
    fn dimension(&self) -> Dimension;

    /// Score the document.
    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult;
}

/// Outcome of one check against one schema.
///
/// Serializes flat, with the verdict under the dimension's flag name:
///
/// ```json
/// { "compliant": false, "issues": [...], "warnings": [...], "score": 75 }
/// ```
///
/// followed by any check details (`readinessChecks`, `securityChecks`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub dimension: Dimension,
    /// Dimension-specific verdict (`compliant`, `aligned`, ...).
    pub passed: bool,
    /// Error-severity findings.
    pub issues: Vec<Issue>,
    /// Warning-severity findings.
    pub warnings: Vec<Issue>,
    /// 0..=100.
    pub score: u32,
    /// Extra check details, emitted after the fixed fields.
    pub details: Map<String, Value>,
}

impl CheckResult {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            passed: false,
            issues: Vec::new(),
            warnings: Vec::new(),
            score: 0,
            details: Map::new(),
        }
    }

    /// Record a finding in `issues` or `warnings` according to its severity.
    pub fn push(&mut self, issue: Issue) {
        if issue.is_error() {
            self.issues.push(issue);
        } else {
            self.warnings.push(issue);
        }
    }

    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }
}

impl Serialize for CheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4 + self.details.len()))?;
        map.serialize_entry(self.dimension.flag_name(), &self.passed)?;
        map.serialize_entry("issues", &self.issues)?;
        map.serialize_entry("warnings", &self.warnings)?;
        map.serialize_entry("score", &self.score)?;
        for (key, value) in &self.details {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
