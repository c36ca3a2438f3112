//! # Schema Assessment
//!
//! Runs every [`QualityCheck`] against one schema and folds the results
//! into a [`SchemaAssessment`]:
//!
//! ```text
//! file ──read──▶ parse ──▶ fan out 5 checks ──join──▶ SchemaAssessment
//!   │              │
//!   └── failure ───┴──▶ VALIDATION_ERROR assessment, score 0
//! ```
//!
//! Across files, assessments run through a bounded pool. Output order is
//! discovery order: directories in the order given, files sorted by name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;
use vcsr_core::score::rounded_mean;
use vcsr_core::{is_schema_file, parse_document, Dimension, Issue};

use crate::check::{CheckContext, CheckResult, QualityCheck};
use crate::checks::default_checks;

/// Minimum overall score for a schema to pass.
pub const PASS_THRESHOLD: u32 = 80;

/// Default number of files assessed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Aggregated result of all checks for one schema file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAssessment {
    /// Path as discovered or as given by the caller.
    pub schema_path: String,
    /// File name component of `schema_path`.
    pub schema: String,
    pub overall_score: u32,
    pub passed: bool,
    pub issues: Vec<Issue>,
    pub warnings: Vec<Issue>,
    /// Per-dimension results. Empty when the file could not be read or parsed.
    pub details: BTreeMap<Dimension, CheckResult>,
}

impl SchemaAssessment {
    /// The synthetic result for a schema that could not be assessed.
    pub fn failed(schema_path: &str, reason: impl std::fmt::Display) -> Self {
        Self {
            schema_path: schema_path.to_string(),
            schema: file_name_of(schema_path),
            overall_score: 0,
            passed: false,
            issues: vec![Issue::error(
                "VALIDATION_ERROR",
                format!("Failed to validate schema: {reason}"),
                schema_path,
            )],
            warnings: Vec::new(),
            details: BTreeMap::new(),
        }
    }

    /// Score of one dimension, if it was computed.
    pub fn score_for(&self, dimension: Dimension) -> Option<u32> {
        self.details.get(&dimension).map(|r| r.score)
    }
}

fn file_name_of(schema_path: &str) -> String {
    Path::new(schema_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(schema_path)
        .to_string()
}

/// Runs a fixed set of checks over schemas.
#[derive(Debug, Clone)]
pub struct Assessor {
    checks: Vec<Arc<dyn QualityCheck>>,
}

impl Default for Assessor {
    fn default() -> Self {
        Self::new(default_checks())
    }
}

impl Assessor {
    pub fn new(checks: Vec<Arc<dyn QualityCheck>>) -> Self {
        Self { checks }
    }

    pub fn checks(&self) -> &[Arc<dyn QualityCheck>] {
        &self.checks
    }

    /// Assess an already-parsed document.
    ///
    /// The checks are independent; they are issued together and joined
    /// before aggregation.
    pub async fn assess_document(&self, document: &Value, schema_path: &str) -> SchemaAssessment {
        let ctx = CheckContext::new(document, schema_path);
        let results = futures::future::join_all(self.checks.iter().map(|check| {
            let check = Arc::clone(check);
            async move { check.evaluate(&ctx) }
        }))
        .await;
        aggregate(schema_path, ctx.file_name, results)
    }

    /// Read, parse and assess one file. Never fails: read and parse errors
    /// become a failing assessment.
    pub async fn assess_file(&self, path: &Path) -> SchemaAssessment {
        let schema_path = path.display().to_string();
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %schema_path, error = %e, "failed to read schema");
                return SchemaAssessment::failed(&schema_path, e);
            }
        };
        let document = match parse_document(&text) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %schema_path, error = %e, "failed to parse schema");
                return SchemaAssessment::failed(&schema_path, e);
            }
        };
        let assessment = self.assess_document(&document, &schema_path).await;
        tracing::debug!(
            path = %schema_path,
            score = assessment.overall_score,
            passed = assessment.passed,
            "assessed schema"
        );
        assessment
    }

    /// Assess every schema file in `dirs`, at most `concurrency` at a time.
    ///
    /// Unreadable directories are logged and skipped.
    pub async fn assess_directories(
        &self,
        dirs: &[PathBuf],
        concurrency: usize,
    ) -> Vec<SchemaAssessment> {
        let files = discover_schema_files(dirs).await;
        tracing::info!(files = files.len(), dirs = dirs.len(), "assessing schemas");
        stream::iter(files)
            .map(|path| async move { self.assess_file(&path).await })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

fn aggregate(schema_path: &str, file_name: &str, results: Vec<CheckResult>) -> SchemaAssessment {
    let scores: Vec<u32> = results.iter().map(|r| r.score).collect();
    let overall_score = rounded_mean(&scores);

    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    let mut details = BTreeMap::new();
    for result in results {
        issues.extend(result.issues.iter().cloned());
        warnings.extend(result.warnings.iter().cloned());
        details.insert(result.dimension, result);
    }

    SchemaAssessment {
        schema_path: schema_path.to_string(),
        schema: file_name.to_string(),
        overall_score,
        passed: issues.is_empty() && overall_score >= PASS_THRESHOLD,
        issues,
        warnings,
        details,
    }
}

/// List schema files in each directory, sorted by name within a directory.
pub async fn discover_schema_files(dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in dirs {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable schema directory");
                continue;
            }
        };
        let mut found = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name();
                    let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
                    if !is_dir && name.to_str().is_some_and(is_schema_file) {
                        found.push(entry.path());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "error while listing schema directory");
                    break;
                }
            }
        }
        found.sort();
        files.extend(found);
    }
    files
}

/// Assess one parsed document with the default checks.
pub async fn assess_schema(document: &Value, schema_path: &str) -> SchemaAssessment {
    Assessor::default().assess_document(document, schema_path).await
}

/// Assess one file with the default checks.
pub async fn assess_file(path: &Path) -> SchemaAssessment {
    Assessor::default().assess_file(path).await
}

/// Assess every schema file in `dirs` with the default checks.
pub async fn assess_directories(dirs: &[PathBuf], concurrency: usize) -> Vec<SchemaAssessment> {
    Assessor::default().assess_directories(dirs, concurrency).await
}
