//! Security and privacy heuristics.
//!
//! The sensitive-term scan runs over the whole serialized document and is
//! expected to flag legitimate names such as `publicKey`. It only ever warns.
//!
//! `noSensitiveDefaults` and `noPlaintextSecrets` are not evaluated against
//! the document. Both report `true` and count towards the score denominator.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use vcsr_core::score::percentage;
use vcsr_core::{Dimension, Issue};

use crate::check::{CheckContext, CheckResult, QualityCheck};

static SENSITIVE_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)password|secret|key|token|ssn|credit.?card|bank")
        .unwrap_or_else(|e| panic!("sensitive-term pattern is invalid: {e}"))
});

const PRIVACY_MARKERS: [&str; 2] = ["consent", "privacy"];
const ACCESS_MARKERS: [&str; 3] = ["access", "permission", "role"];
const SECURE_THRESHOLD: u32 = 75;

#[derive(Debug, Default, Clone, Copy)]
pub struct SecurityCheck;

impl QualityCheck for SecurityCheck {
    fn dimension(&self) -> Dimension {
        Dimension::SecurityCompliance
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let doc = ctx.document;
        let mut result = CheckResult::new(self.dimension());

        let text = doc.value().to_string();
        if SENSITIVE_TERMS.is_match(&text) {
            result.push(Issue::warning(
                "SECURITY_SENSITIVE_DATA_DETECTED",
                "Schema may contain sensitive data patterns",
                ctx.schema_path,
            ));
        }

        let no_sensitive_defaults = true;
        let has_privacy_controls = PRIVACY_MARKERS.iter().any(|m| doc.any_key_contains(m));
        let has_access_controls = ACCESS_MARKERS.iter().any(|m| doc.any_key_contains(m));
        let no_plaintext_secrets = true;

        let flags = [
            no_sensitive_defaults,
            has_privacy_controls,
            has_access_controls,
            no_plaintext_secrets,
        ];
        result.score = percentage(flags.iter().filter(|f| **f).count(), flags.len());
        result.passed = result.issues.is_empty() && result.score >= SECURE_THRESHOLD;

        result.with_detail(
            "securityChecks",
            json!({
                "noSensitiveDefaults": no_sensitive_defaults,
                "hasPrivacyControls": has_privacy_controls,
                "hasAccessControls": has_access_controls,
                "noPlaintextSecrets": no_plaintext_secrets,
            }),
        )
    }
}
