//! Production readiness: documentation and constraint coverage.

use serde_json::{Map, Value};
use vcsr_core::score::percentage;
use vcsr_core::{Dimension, Issue, SchemaView};

use crate::check::{CheckContext, CheckResult, QualityCheck};

const READY_THRESHOLD: u32 = 80;

/// Keywords that count as a validation constraint on a property.
const CONSTRAINT_KEYWORDS: [&str; 7] = [
    "pattern",
    "format",
    "minimum",
    "maximum",
    "minLength",
    "maxLength",
    "enum",
];

struct Criterion {
    name: &'static str,
    blocking: bool,
    message: &'static str,
    test: fn(&SchemaView<'_>) -> bool,
}

const CRITERIA: [Criterion; 6] = [
    Criterion {
        name: "hasTitle",
        blocking: true,
        message: "Schema missing title field",
        test: |doc| doc.has("title"),
    },
    Criterion {
        name: "hasDescription",
        blocking: true,
        message: "Schema missing description field",
        test: |doc| doc.has("description"),
    },
    Criterion {
        name: "hasVersion",
        blocking: false,
        message: "Schema missing version information",
        test: |doc| doc.has("version") || doc.has("$id"),
    },
    Criterion {
        name: "hasExamples",
        blocking: false,
        message: "Schema missing examples for better usability",
        test: |doc| doc.has("examples") || doc.any_property_has("examples"),
    },
    Criterion {
        name: "hasRequiredFields",
        blocking: true,
        message: "Schema has no required fields defined",
        test: |doc| doc.has_required_fields(),
    },
    Criterion {
        name: "hasValidation",
        blocking: false,
        message: "Schema lacks validation constraints",
        test: |doc| CONSTRAINT_KEYWORDS.iter().any(|kw| doc.any_property_has(kw)),
    },
];

#[derive(Debug, Default, Clone, Copy)]
pub struct ReadinessCheck;

impl QualityCheck for ReadinessCheck {
    fn dimension(&self) -> Dimension {
        Dimension::ProductionReadiness
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> CheckResult {
        let mut result = CheckResult::new(self.dimension());
        let mut checks = Map::new();
        let mut satisfied = 0;

        for criterion in &CRITERIA {
            let ok = (criterion.test)(&ctx.document);
            checks.insert(criterion.name.to_string(), Value::Bool(ok));
            if ok {
                satisfied += 1;
                continue;
            }
            let code = format!("PRODUCTION_{}", criterion.name.to_uppercase());
            let issue = if criterion.blocking {
                Issue::error(code, criterion.message, ctx.schema_path)
            } else {
                Issue::warning(code, criterion.message, ctx.schema_path)
            };
            result.push(issue);
        }

        result.score = percentage(satisfied, CRITERIA.len());
        result.passed = result.issues.is_empty() && result.score >= READY_THRESHOLD;
        result.with_detail("readinessChecks", Value::Object(checks))
    }
}
