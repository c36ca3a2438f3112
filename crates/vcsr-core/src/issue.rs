//! # Issues: Findings Produced by Quality Checks
//!
//! An [`Issue`] is an immutable value: a machine-readable code, a human
//! message, the path of the schema it was found in, and a severity.
//! Errors fail an assessment; warnings only reduce its score.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the schema from passing.
    Error,
    /// Advisory only.
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding.
///
/// Serializes as `{"type", "message", "path", "severity"}` so reports stay
/// readable by existing tooling that consumes `validation-report.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Machine-readable code, e.g. `W3C_STRUCTURE_MISSING`.
    #[serde(rename = "type")]
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// Path of the schema file the finding belongs to.
    pub path: String,
    pub severity: Severity,
}

impl Issue {
    /// Construct an error-severity finding.
    pub fn error(code: impl Into<String>, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: path.into(),
            severity: Severity::Error,
        }
    }

    /// Construct a warning-severity finding.
    pub fn warning(code: impl Into<String>, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: path.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {} ({})", self.severity, self.code, self.message, self.path)
    }
}
