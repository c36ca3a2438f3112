//! Batch generation over uploaded files.
//!
//! Items are independent. A failing item becomes an inline error stub in
//! its slot; the batch itself never fails. At most `concurrency` items are
//! generated at once, so a large upload cannot start one generator process
//! per file.

use std::future::Future;
use std::num::NonZeroUsize;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::error::CodegenError;
use crate::generator::GeneratedCode;
use crate::language::Language;
use crate::source::{resolve_upload, ResolvedSource, UploadedFile};

/// Results in input order, with counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub results: Vec<GeneratedCode>,
    pub total_files: usize,
    pub success_count: usize,
    pub error_count: usize,
}

/// Items generated at once when nothing else is configured: one per CPU.
pub fn default_batch_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
}

/// The placeholder result for a file that could not be generated.
pub fn error_stub(language: Language, file_name: &str, code: String) -> GeneratedCode {
    GeneratedCode {
        language,
        code,
        filename: format!("error-{file_name}.txt"),
    }
}

async fn generate_one<F, Fut>(
    file: &UploadedFile,
    language: Language,
    generate: &F,
) -> Result<GeneratedCode, GeneratedCode>
where
    F: Fn(ResolvedSource) -> Fut,
    Fut: Future<Output = Result<GeneratedCode, CodegenError>>,
{
    if file.content.trim().is_empty() {
        return Err(error_stub(
            language,
            &file.name,
            format!("// Error: Empty file content for {}", file.name),
        ));
    }
    let outcome = match resolve_upload(file) {
        Ok(source) => generate(source).await,
        Err(e) => Err(e),
    };
    outcome.map_err(|e| {
        tracing::warn!(file = %file.name, error = %e, "failed to generate code for upload");
        error_stub(
            language,
            &file.name,
            format!("// Error processing {}: {e}", file.name),
        )
    })
}

/// Resolve every file and hand it to `generate`, at most `concurrency` at
/// a time, preserving input order. A `concurrency` of 0 is treated as 1.
pub async fn generate_batch<F, Fut>(
    files: &[UploadedFile],
    language: Language,
    concurrency: usize,
    generate: F,
) -> BatchOutcome
where
    F: Fn(ResolvedSource) -> Fut,
    Fut: Future<Output = Result<GeneratedCode, CodegenError>>,
{
    let generate = &generate;
    let pending: Vec<_> = files
        .iter()
        .map(|file| generate_one(file, language, generate))
        .collect();
    let outcomes: Vec<Result<GeneratedCode, GeneratedCode>> = stream::iter(pending)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let success_count = outcomes.iter().filter(|o| o.is_ok()).count();
    let results: Vec<GeneratedCode> = outcomes
        .into_iter()
        .map(|o| o.unwrap_or_else(|stub| stub))
        .collect();
    BatchOutcome {
        total_files: results.len(),
        error_count: results.len() - success_count,
        success_count,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Names the type, or fails for the type `Fail`.
    async fn echo(source: ResolvedSource, language: Language) -> Result<GeneratedCode, CodegenError> {
        let name = &source.input.type_name;
        if name == "Fail" {
            return Err(CodegenError::Generator("boom".into()));
        }
        Ok(GeneratedCode::new(language, name, format!("// {name} for {language}")))
    }

    fn file(name: &str, content: &str) -> UploadedFile {
        UploadedFile {
            name: name.into(),
            content: content.into(),
            kind: crate::source::UploadType::Unknown,
        }
    }

    #[tokio::test]
    async fn failures_become_stubs_in_place() {
        let files = vec![
            file("person.json", r#"{"title": "Person", "type": "object"}"#),
            file("empty.json", ""),
            file("fail.json", r#"{"a": 1}"#),
            file("notes.txt", "plain words"),
        ];
        let outcome = generate_batch(&files, Language::Go, 2, |s| echo(s, Language::Go)).await;

        assert_eq!(outcome.total_files, 4);
        assert_eq!(outcome.success_count, 1);
        assert_eq!(outcome.error_count, 3);

        assert_eq!(outcome.results[0].filename, "Person.go");
        assert_eq!(outcome.results[0].code, "// Person for go");

        assert_eq!(outcome.results[1].code, "// Error: Empty file content for empty.json");
        assert_eq!(outcome.results[1].filename, "error-empty.json.txt");

        assert_eq!(
            outcome.results[2].code,
            "// Error processing fail.json: code generator failed: boom"
        );
        assert!(outcome.results[3].code.starts_with("// Error processing notes.txt:"));
    }

    #[tokio::test]
    async fn empty_batch() {
        let outcome = generate_batch(&[], Language::Go, 4, |s| echo(s, Language::Go)).await;
        assert_eq!(outcome.total_files, 0);
        assert!(outcome.results.is_empty());
    }

    #[tokio::test]
    async fn zero_concurrency_still_runs() {
        let files = vec![file("a.json", r#"{"title": "A", "type": "object"}"#)];
        let outcome = generate_batch(&files, Language::Go, 0, |s| echo(s, Language::Go)).await;
        assert_eq!(outcome.success_count, 1);
    }

    #[test]
    fn default_concurrency_is_positive() {
        assert!(default_batch_concurrency() >= 1);
    }

    #[test]
    fn serializes_counts_camel_case() {
        let outcome = BatchOutcome {
            results: vec![],
            total_files: 0,
            success_count: 0,
            error_count: 0,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("successCount").is_some());
        assert!(json.get("totalFiles").is_some());
    }
}
