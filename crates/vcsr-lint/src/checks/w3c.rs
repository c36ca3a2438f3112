//! W3C Verifiable Credential structural compliance.

use vcsr_core::score::penalized;
use vcsr_core::{Dimension, Issue};

use crate::check::{CheckContext, CheckResult, QualityCheck};

/// Property names a VC-shaped schema must declare.
pub const REQUIRED_VC_PROPERTIES: [&str; 3] = ["@context", "type", "credentialSubject"];

/// Contexts at least one of which a constrained `@context` should allow.
pub const STANDARD_CONTEXTS: [&str; 2] = [
    "https://www.w3.org/2018/credentials/v1",
    "https://w3id.org/security/suites/ed25519-2020/v1",
];

const ISSUE_PENALTY: u32 = 25;
const WARNING_PENALTY: u32 = 5;

#[derive(Debug, Default, Clone, Copy)]
pub struct W3cStructureCheck;

impl QualityCheck for W3cStructureCheck {
    fn dimension(&self) -> Dimension {
        Dimension::W3cCompliance
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let doc = ctx.document;
        let path = ctx.schema_path;
        let mut result = CheckResult::new(self.dimension());

        let missing: Vec<&str> = REQUIRED_VC_PROPERTIES
            .iter()
            .copied()
            .filter(|name| !doc.has_property(name))
            .collect();
        if !missing.is_empty() {
            result.push(Issue::error(
                "W3C_STRUCTURE_MISSING",
                format!(
                    "Schema missing required W3C VC structure (missing: {})",
                    missing.join(", ")
                ),
                path,
            ));
        }

        if doc.has_property("@context") {
            match doc.property_item_enum("@context") {
                None => result.push(Issue::warning(
                    "W3C_CONTEXT_FLEXIBLE",
                    "Consider constraining @context to known W3C contexts",
                    path,
                )),
                Some(contexts) => {
                    if !contexts.iter().any(|c| STANDARD_CONTEXTS.contains(c)) {
                        result.push(Issue::warning(
                            "W3C_CONTEXT_MISSING_STANDARD",
                            "Missing standard W3C contexts",
                            path,
                        ));
                    }
                }
            }
        }

        if let Some(types) = doc.property_item_enum("type") {
            if !types.contains(&"VerifiableCredential") {
                result.push(Issue::warning(
                    "W3C_TYPE_MISSING_VC",
                    "Consider including \"VerifiableCredential\" in type array",
                    path,
                ));
            }
        }

        if doc.has_properties() && !doc.has_property("proof") {
            result.push(Issue::warning(
                "W3C_PROOF_MISSING",
                "Schema should include proof field for W3C VC compliance",
                path,
            ));
        }

        result.score = penalized(
            result.issues.len(),
            result.warnings.len(),
            ISSUE_PENALTY,
            WARNING_PENALTY,
        );
        result.passed = result.issues.is_empty();
        result
    }
}
