//! Schema.org vocabulary alignment.
//!
//! A heuristic: the schema name is matched against a short list of
//! Schema.org types, and only schemas that look like one of those types are
//! scored. Everything else passes vacuously.

use serde_json::json;
use vcsr_core::score::percentage;
use vcsr_core::{schema_stem, Dimension, Issue};

use crate::check::{CheckContext, CheckResult, QualityCheck};

pub const KNOWN_TYPES: [&str; 9] = [
    "Person",
    "Organization",
    "CreativeWork",
    "Action",
    "Event",
    "Place",
    "Product",
    "Service",
    "Thing",
];

pub const COMMON_PROPERTIES: [&str; 8] = [
    "name",
    "description",
    "url",
    "identifier",
    "dateCreated",
    "dateModified",
    "creator",
    "publisher",
];

const ALIGNED_THRESHOLD: u32 = 70;
const SCHEMA_ORG_MARKER: &str = "schema.org";

#[derive(Debug, Default, Clone, Copy)]
pub struct VocabularyCheck;

impl QualityCheck for VocabularyCheck {
    fn dimension(&self) -> Dimension {
        Dimension::SchemaOrgAlignment
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let doc = ctx.document;
        let mut result = CheckResult::new(self.dimension());

        let name = doc
            .title()
            .unwrap_or_else(|| schema_stem(ctx.file_name))
            .to_lowercase();
        let matches_type = KNOWN_TYPES
            .iter()
            .any(|t| name.contains(&t.to_lowercase()));

        let mut matches = 0usize;
        let mut total = 0usize;

        if matches_type {
            total += 1;
            if doc.has_property("@context") {
                let has_schema_org = doc
                    .property_item_enum("@context")
                    .is_some_and(|ctxs| ctxs.iter().any(|c| c.contains(SCHEMA_ORG_MARKER)));
                if has_schema_org {
                    matches += 1;
                } else {
                    result.push(Issue::warning(
                        "SCHEMA_ORG_CONTEXT_MISSING",
                        "Consider adding Schema.org context for better interoperability",
                        ctx.schema_path,
                    ));
                }
            }

            if doc.has_properties() {
                total += COMMON_PROPERTIES.len();
                matches += COMMON_PROPERTIES
                    .iter()
                    .filter(|prop| doc.has_property(prop) || doc.any_key_contains(prop))
                    .count();
            }
        }

        result.score = if total > 0 { percentage(matches, total) } else { 100 };
        result.passed = result.score >= ALIGNED_THRESHOLD;
        result.with_detail(
            "alignmentDetails",
            json!({ "matches": matches, "total": total }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn run(doc: &Value, path: &str) -> CheckResult {
        VocabularyCheck.evaluate(&CheckContext::new(doc, path))
    }

    #[test]
    fn unrelated_schema_passes_vacuously() {
        let doc = json!({"title": "Membership Credential", "properties": {"foo": {}}});
        let result = run(&doc, "Membership.schema.json");
        assert_eq!(result.score, 100);
        assert!(result.passed);
        assert_eq!(result.details["alignmentDetails"]["total"], 0);
    }

    #[test]
    fn type_match_is_case_insensitive() {
        let doc = json!({"title": "person credential"});
        let result = run(&doc, "x.schema.json");
        // One possible point (type match) with no @context and no properties.
        assert_eq!(result.details["alignmentDetails"]["total"], 1);
        assert_eq!(result.score, 0);
        assert!(!result.passed);
    }

    #[test]
    fn file_name_used_without_title() {
        let doc = json!({"properties": {"name": {}}});
        let result = run(&doc, "schemas/v1/OrganizationProfile.schema.json");
        assert_eq!(result.details["alignmentDetails"]["total"], 9);
        assert_eq!(result.details["alignmentDetails"]["matches"], 1);
        assert_eq!(result.score, 11);
    }

    #[test]
    fn schema_org_context_counts() {
        let doc = json!({
            "title": "Person",
            "properties": {
                "@context": {"items": {"enum": ["https://schema.org"]}},
                "name": {}, "description": {}, "url": {}, "identifier": {},
                "dateCreated": {}, "dateModified": {}, "creator": {}, "publisher": {}
            }
        });
        let result = run(&doc, "Person.schema.json");
        assert_eq!(result.score, 100);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_schema_org_context_warns() {
        let doc = json!({
            "title": "Event",
            "properties": {"@context": {"items": {"enum": ["https://www.w3.org/2018/credentials/v1"]}}}
        });
        let result = run(&doc, "Event.schema.json");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "SCHEMA_ORG_CONTEXT_MISSING");
        assert!(result.issues.is_empty());
    }

    #[test]
    fn common_properties_match_by_key_substring() {
        let doc = json!({
            "title": "Product",
            "properties": {"productName": {}, "ProductURL": {}, "creatorId": {}}
        });
        let result = run(&doc, "Product.schema.json");
        assert_eq!(result.details["alignmentDetails"]["matches"], 3);
        assert_eq!(result.details["alignmentDetails"]["total"], 9);
    }

    #[test]
    fn camel_case_names_need_an_exact_key() {
        // Keys are lowercased before the substring test, names are not, so
        // "dateCreated" only ever matches a key spelled exactly that way.
        let doc = json!({
            "title": "Person",
            "properties": {"DateCreated": {}, "DateModified": {}}
        });
        let result = run(&doc, "Person.schema.json");
        assert_eq!(result.details["alignmentDetails"]["matches"], 0);
        assert_eq!(result.details["alignmentDetails"]["total"], 9);
        assert_eq!(result.score, 0);
    }
}
