//! # The Five Quality Checks
//!
//! | Dimension | Check | Verdict |
//! |-----------|-------|---------|
//! | `w3cCompliance` | [`W3cStructureCheck`] | no errors |
//! | `schemaOrgAlignment` | [`VocabularyCheck`] | score ≥ 70 |
//! | `crossRegistryCompatibility` | [`CrossRegistryCheck`] | score ≥ 66 |
//! | `productionReadiness` | [`ReadinessCheck`] | no errors and score ≥ 80 |
//! | `securityCompliance` | [`SecurityCheck`] | no errors and score ≥ 75 |
//!
//! The vocabulary and security checks are text heuristics. Their findings
//! are advisory; neither ever emits an error-severity issue.

mod cross_registry;
mod readiness;
mod security;
mod vocabulary;
mod w3c;

pub use cross_registry::{CrossRegistryCheck, PLATFORM_CONTEXT_MARKERS};
pub use readiness::ReadinessCheck;
pub use security::SecurityCheck;
pub use vocabulary::{VocabularyCheck, COMMON_PROPERTIES, KNOWN_TYPES};
pub use w3c::{W3cStructureCheck, REQUIRED_VC_PROPERTIES, STANDARD_CONTEXTS};

use std::sync::Arc;

use crate::check::QualityCheck;

/// One instance of every check, in report order.
pub fn default_checks() -> Vec<Arc<dyn QualityCheck>> {
    vec![
        Arc::new(W3cStructureCheck),
        Arc::new(VocabularyCheck),
        Arc::new(CrossRegistryCheck),
        Arc::new(ReadinessCheck),
        Arc::new(SecurityCheck),
    ]
}
