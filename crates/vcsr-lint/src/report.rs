//! # Lint Report
//!
//! A pure fold from a list of [`SchemaAssessment`]s to a [`Report`]. The only
//! non-derived field is `generatedAt`, supplied by the caller, so scoring
//! stays reproducible.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use vcsr_core::score::{percentage, rounded_mean};
use vcsr_core::Dimension;

use crate::assessment::SchemaAssessment;

/// An issue code occurring at least this often yields a recommendation.
pub const COMMON_ISSUE_THRESHOLD: usize = 3;

/// Schemas scoring below this are listed as low quality.
pub const LOW_QUALITY_THRESHOLD: u32 = 70;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub category_scores: BTreeMap<Dimension, u32>,
    /// Total error-severity issues across all schemas.
    pub critical_issues: usize,
    /// Total warnings across all schemas.
    pub warnings: usize,
    pub details: Vec<SchemaAssessment>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_schemas: usize,
    pub passed: usize,
    pub failed: usize,
    /// Rounded mean of overall scores; 0 when there are no schemas.
    pub average_score: u32,
    /// Rounded percentage of passing schemas; 0 when there are no schemas.
    pub pass_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationKind {
    CommonIssue,
    LowQualitySchemas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_schemas: Option<Vec<String>>,
}

impl Report {
    /// Whether any schema failed; drives the CLI exit status.
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

/// Aggregate assessments into a report.
pub fn build_report(assessments: Vec<SchemaAssessment>, generated_at: DateTime<Utc>) -> Report {
    let total = assessments.len();
    let passed = assessments.iter().filter(|a| a.passed).count();
    let overall: Vec<u32> = assessments.iter().map(|a| a.overall_score).collect();

    let summary = Summary {
        total_schemas: total,
        passed,
        failed: total - passed,
        average_score: rounded_mean(&overall),
        pass_rate: percentage(passed, total),
    };

    // Averaged only over assessments where the dimension was computed, so a
    // file that failed to parse does not drag every category towards zero.
    let category_scores = Dimension::all()
        .iter()
        .map(|dim| {
            let scores: Vec<u32> = assessments.iter().filter_map(|a| a.score_for(*dim)).collect();
            (*dim, rounded_mean(&scores))
        })
        .collect();

    let critical_issues = assessments.iter().map(|a| a.issues.len()).sum();
    let warnings = assessments.iter().map(|a| a.warnings.len()).sum();
    let recommendations = build_recommendations(&assessments);

    Report {
        generated_at,
        summary,
        category_scores,
        critical_issues,
        warnings,
        details: assessments,
        recommendations,
    }
}

/// Derive recommendations: frequent issue codes first, in order of first
/// occurrence, then one aggregate entry for low-scoring schemas.
pub fn build_recommendations(assessments: &[SchemaAssessment]) -> Vec<Recommendation> {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for issue in assessments.iter().flat_map(|a| &a.issues) {
        match tally.iter_mut().find(|(code, _)| *code == issue.code) {
            Some((_, count)) => *count += 1,
            None => tally.push((issue.code.as_str(), 1)),
        }
    }

    let mut recommendations: Vec<Recommendation> = tally
        .into_iter()
        .filter(|(_, count)| *count >= COMMON_ISSUE_THRESHOLD)
        .map(|(code, count)| Recommendation {
            kind: RecommendationKind::CommonIssue,
            priority: Priority::High,
            message: format!(
                "{count} schemas have {code} issues - consider creating a standard template"
            ),
            issue_type: Some(code.to_string()),
            affected_count: Some(count),
            affected_schemas: None,
        })
        .collect();

    let low_quality: Vec<String> = assessments
        .iter()
        .filter(|a| a.overall_score < LOW_QUALITY_THRESHOLD)
        .map(|a| a.schema.clone())
        .collect();
    if !low_quality.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::LowQualitySchemas,
            priority: Priority::High,
            message: format!("{} schemas need significant improvement", low_quality.len()),
            issue_type: None,
            affected_count: None,
            affected_schemas: Some(low_quality),
        });
    }

    recommendations
}
