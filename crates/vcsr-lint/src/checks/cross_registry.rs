//! Compatibility with sibling credential registries.

use serde_json::json;
use vcsr_core::score::percentage;
use vcsr_core::{Dimension, Issue};

use crate::check::{CheckContext, CheckResult, QualityCheck};

/// `@context` substrings that mark a schema as usable on the cheqd network.
pub const PLATFORM_CONTEXT_MARKERS: [&str; 2] = ["cheqd", "originvault.box"];

const COMPATIBLE_THRESHOLD: u32 = 66;

#[derive(Debug, Default, Clone, Copy)]
pub struct CrossRegistryCheck;

impl QualityCheck for CrossRegistryCheck {
    fn dimension(&self) -> Dimension {
        Dimension::CrossRegistryCompatibility
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let doc = ctx.document;
        let mut result = CheckResult::new(self.dimension());

        let dif = doc
            .lookup(&["properties", "credentialSubject", "properties", "id"])
            .is_some();
        let cheqd = doc.property_item_enum("@context").is_some_and(|ctxs| {
            ctxs.iter()
                .any(|c| PLATFORM_CONTEXT_MARKERS.iter().any(|m| c.contains(m)))
        });
        let open_verifiable = ["issuer", "credentialSubject", "proof"]
            .iter()
            .any(|p| doc.has_property(p));

        let flags = [dif, cheqd, open_verifiable];
        result.score = percentage(flags.iter().filter(|f| **f).count(), flags.len());
        result.passed = result.score >= COMPATIBLE_THRESHOLD;
        if !result.passed {
            result.push(Issue::warning(
                "LOW_CROSS_REGISTRY_COMPATIBILITY",
                "Schema has limited compatibility across registries",
                ctx.schema_path,
            ));
        }

        result.with_detail(
            "registryCompatibility",
            json!({
                "difCompatible": dif,
                "cheqdCompatible": cheqd,
                "openVerifiableCompatible": open_verifiable,
            }),
        )
    }
}
