//! # Quality Dimensions
//!
//! The five axes every schema is scored on. A single enum keeps report
//! keys, pass-flag names and display labels in one place; every `match`
//! on it is exhaustive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A quality dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    /// W3C Verifiable Credential structural shape.
    W3cCompliance,
    /// Alignment with the schema.org vocabulary.
    SchemaOrgAlignment,
    /// Compatibility with sibling credential registries.
    CrossRegistryCompatibility,
    /// Metadata and constraints expected of a published schema.
    ProductionReadiness,
    /// Privacy and sensitive-data heuristics.
    SecurityCompliance,
}

/// Number of dimensions. Assessment scores are a mean over exactly this many.
pub const DIMENSION_COUNT: usize = 5;

impl Dimension {
    /// All dimensions in report order.
    pub fn all() -> &'static [Dimension; DIMENSION_COUNT] {
        &[
            Self::W3cCompliance,
            Self::SchemaOrgAlignment,
            Self::CrossRegistryCompatibility,
            Self::ProductionReadiness,
            Self::SecurityCompliance,
        ]
    }

    /// Key used in report `details` and `categoryScores` objects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::W3cCompliance => "w3cCompliance",
            Self::SchemaOrgAlignment => "schemaOrgAlignment",
            Self::CrossRegistryCompatibility => "crossRegistryCompatibility",
            Self::ProductionReadiness => "productionReadiness",
            Self::SecurityCompliance => "securityCompliance",
        }
    }

    /// Name of the boolean verdict field in a serialized check result.
    pub fn flag_name(&self) -> &'static str {
        match self {
            Self::W3cCompliance => "compliant",
            Self::SchemaOrgAlignment => "aligned",
            Self::CrossRegistryCompatibility => "compatible",
            Self::ProductionReadiness => "ready",
            Self::SecurityCompliance => "secure",
        }
    }

    /// Human-readable label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::W3cCompliance => "W3C Compliance",
            Self::SchemaOrgAlignment => "Schema.org Alignment",
            Self::CrossRegistryCompatibility => "Cross-Registry Compatibility",
            Self::ProductionReadiness => "Production Readiness",
            Self::SecurityCompliance => "Security Compliance",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
