//! # vcsr-lint: Schema Quality Linter
//!
//! Scores credential schemas along five independent dimensions and
//! aggregates the scores into a report with recommendations.
//!
//! ## Pipeline
//!
//! ```text
//! dirs ─▶ discover *.schema.json ─▶ per file: 5 checks ─▶ SchemaAssessment
//!                                                              │
//!                      Report { summary, categoryScores, ... } ◀┘
//! ```
//!
//! - [`check`]: the [`QualityCheck`] trait and [`CheckResult`].
//! - [`checks`]: the five built-in checks.
//! - [`assessment`]: per-schema orchestration and directory discovery.
//! - [`report`]: report and recommendation building.
//! - [`summary`]: console rendering.
//!
//! Checks are pure. File and directory failures never abort a run; they
//! surface as failing assessments or logged warnings.

pub mod assessment;
pub mod check;
pub mod checks;
pub mod report;
pub mod summary;

pub use assessment::{
    assess_directories, assess_file, assess_schema, discover_schema_files, Assessor,
    SchemaAssessment, DEFAULT_CONCURRENCY, PASS_THRESHOLD,
};
pub use check::{CheckContext, CheckResult, QualityCheck};
pub use checks::default_checks;
pub use report::{build_recommendations, build_report, Recommendation, RecommendationKind, Report, Summary};
pub use summary::render_summary;
