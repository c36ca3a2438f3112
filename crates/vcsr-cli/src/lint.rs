//! # Lint CLI: Score registry schemas and write the quality report.
//!
//! ```bash
//! vcsr lint
//! vcsr lint --dir schemas/v1 --dir drafts --output validation-report.json
//! vcsr lint --json --concurrency 16
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use vcsr_lint::{assess_directories, build_report, render_summary, Report, DEFAULT_CONCURRENCY};

use crate::resolve_path;

/// Directories scanned when no `--dir` is given.
pub const DEFAULT_DIRS: [&str; 2] = ["schemas/v1", "drafts"];

/// Report file written when no `--output` is given.
pub const DEFAULT_REPORT_FILE: &str = "validation-report.json";

/// Lint subcommand arguments.
#[derive(Args, Debug, Clone)]
pub struct LintArgs {
    /// Schema directory to scan. Repeat for several. Defaults to
    /// `schemas/v1` and `drafts`.
    #[arg(long = "dir", value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Where to write the JSON report.
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Schemas assessed at once.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Print the report JSON instead of the summary.
    #[arg(long)]
    pub json: bool,
}

impl Default for LintArgs {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            output: PathBuf::from(DEFAULT_REPORT_FILE),
            concurrency: DEFAULT_CONCURRENCY,
            json: false,
        }
    }
}

impl LintArgs {
    fn resolved_dirs(&self, base: &Path) -> Vec<PathBuf> {
        if self.dirs.is_empty() {
            DEFAULT_DIRS.iter().map(|d| base.join(d)).collect()
        } else {
            self.dirs.iter().map(|d| resolve_path(d, base)).collect()
        }
    }
}

/// Assess every schema, write the report, print the summary.
///
/// Returns 1 when any schema failed.
pub async fn run_lint(args: &LintArgs, base: &Path) -> Result<u8> {
    let report = lint_report(args, base).await;
    let output = resolve_path(&args.output, base);

    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    std::fs::write(&output, &json)
        .with_context(|| format!("failed to write report to {}", output.display()))?;
    tracing::info!(path = %output.display(), "wrote report");

    if args.json {
        println!("{json}");
    } else {
        print!("{}", render_summary(&report, Some(&output)));
    }

    Ok(if report.has_failures() { 1 } else { 0 })
}

/// Build the report without writing anything.
pub async fn lint_report(args: &LintArgs, base: &Path) -> Report {
    let dirs = args.resolved_dirs(base);
    tracing::debug!(?dirs, concurrency = args.concurrency, "linting schema directories");
    let assessments = assess_directories(&dirs, args.concurrency.max(1)).await;
    build_report(assessments, chrono::Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_SCHEMA: &str = r#"{
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Person Credential",
        "description": "A person",
        "type": "object",
        "properties": {
            "@context": {"type": "array", "items": {"enum": ["https://www.w3.org/2018/credentials/v1"]}},
            "type": {"type": "array", "items": {"enum": ["VerifiableCredential"]}},
            "issuer": {"type": "string", "format": "uri"},
            "credentialSubject": {
                "type": "object",
                "properties": {"id": {"type": "string", "format": "uri"}, "name": {"type": "string", "maxLength": 100}}
            },
            "proof": {"type": "object"}
        },
        "required": ["@context", "type", "issuer", "credentialSubject"]
    }"#;

    #[test]
    fn defaults_resolve_against_base() {
        let args = LintArgs::default();
        let dirs = args.resolved_dirs(Path::new("/work"));
        assert_eq!(
            dirs,
            vec![PathBuf::from("/work/schemas/v1"), PathBuf::from("/work/drafts")]
        );
    }

    #[tokio::test]
    async fn missing_directories_still_write_a_report() {
        let dir = tempfile::tempdir().unwrap();
        let code = run_lint(&LintArgs::default(), dir.path()).await.unwrap();
        assert_eq!(code, 0);

        let written = std::fs::read_to_string(dir.path().join(DEFAULT_REPORT_FILE)).unwrap();
        let report: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(report["summary"]["totalSchemas"], 0);
    }

    #[tokio::test]
    async fn failing_schema_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let schemas = dir.path().join("schemas/v1");
        std::fs::create_dir_all(&schemas).unwrap();
        std::fs::write(
            schemas.join("Minimal.schema.json"),
            r#"{"type": "Credential", "issuer": "example.com"}"#,
        )
        .unwrap();

        let args = LintArgs {
            output: PathBuf::from("out/report.json"),
            ..LintArgs::default()
        };
        std::fs::create_dir_all(dir.path().join("out")).unwrap();
        let code = run_lint(&args, dir.path()).await.unwrap();
        assert_eq!(code, 1);
        assert!(dir.path().join("out/report.json").is_file());
    }

    #[tokio::test]
    async fn report_covers_every_directory() {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["a", "b"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
            std::fs::write(dir.path().join(sub).join("Person.schema.json"), GOOD_SCHEMA).unwrap();
        }
        let args = LintArgs {
            dirs: vec![PathBuf::from("a"), PathBuf::from("b")],
            ..LintArgs::default()
        };
        let report = lint_report(&args, dir.path()).await;
        assert_eq!(report.summary.total_schemas, 2);
        assert_eq!(report.details.len(), 2);
    }

    #[tokio::test]
    async fn unwritable_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = LintArgs {
            output: PathBuf::from("missing-dir/report.json"),
            ..LintArgs::default()
        };
        assert!(run_lint(&args, dir.path()).await.is_err());
    }
}
