//! # Generator Boundary
//!
//! Code emission is delegated to an external engine behind the
//! [`CodeGenerator`] trait. [`QuicktypeCli`] drives the `quicktype`
//! executable; tests inject their own implementation.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CodegenError;
use crate::language::Language;
use crate::options::{AcronymStyle, GenerationOptions};

/// What the generator is given to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A JSON Schema document.
    JsonSchema,
    /// A sample JSON value whose shape is inferred.
    JsonSample,
}

impl InputKind {
    /// Value passed to the generator's `--src-lang`.
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::JsonSchema => "schema",
            Self::JsonSample => "json",
        }
    }
}

/// A resolved generator input.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationInput {
    /// Top-level type name, also the generated file's stem.
    pub type_name: String,
    pub kind: InputKind,
    pub content: Value,
    /// File the content was read from, when it lives on disk. Passing the
    /// original file lets relative `$ref`s resolve.
    pub origin: Option<PathBuf>,
}

/// Generated source for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub language: Language,
    pub code: String,
    pub filename: String,
}

impl GeneratedCode {
    pub fn new(language: Language, type_name: &str, code: String) -> Self {
        Self {
            language,
            code,
            filename: format!("{type_name}.{}", language.extension()),
        }
    }
}

/// An engine that turns a schema or sample into source code.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    async fn generate(
        &self,
        input: &GenerationInput,
        language: Language,
        options: &GenerationOptions,
    ) -> Result<String, CodegenError>;
}

/// [`CodeGenerator`] that spawns the `quicktype` executable.
#[derive(Debug, Clone)]
pub struct QuicktypeCli {
    binary: PathBuf,
    timeout: Duration,
}

impl QuicktypeCli {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Command-line arguments for one run, excluding the executable.
    pub fn args(
        input: &GenerationInput,
        input_file: &Path,
        language: Language,
        options: &GenerationOptions,
    ) -> Vec<String> {
        let mut args = vec![
            "--lang".to_string(),
            language.id().to_string(),
            "--src-lang".to_string(),
            input.kind.as_arg().to_string(),
            "--top-level".to_string(),
            input.type_name.clone(),
        ];
        if options.just_types {
            args.push("--just-types".to_string());
        }
        if options.acronym_style != AcronymStyle::Original {
            args.push("--acronym-style".to_string());
            args.push(options.acronym_style.as_arg().to_string());
        }
        if let Some(package) = &options.package_name {
            args.push("--package".to_string());
            args.push(package.clone());
        }
        if let Some(namespace) = &options.namespace {
            args.push("--namespace".to_string());
            args.push(namespace.clone());
        }
        args.push(input_file.display().to_string());
        args
    }
}

#[async_trait]
impl CodeGenerator for QuicktypeCli {
    async fn generate(
        &self,
        input: &GenerationInput,
        language: Language,
        options: &GenerationOptions,
    ) -> Result<String, CodegenError> {
        // Held until the process exits.
        let scratch;
        let input_file = match &input.origin {
            Some(path) => path.clone(),
            None => {
                scratch = tempfile::Builder::new()
                    .prefix("vcsr-codegen-")
                    .suffix(".json")
                    .tempfile()?;
                let body = serde_json::to_vec_pretty(&input.content)
                    .map_err(|e| CodegenError::Generator(format!("cannot serialize input: {e}")))?;
                tokio::fs::write(scratch.path(), body).await?;
                scratch.path().to_path_buf()
            }
        };

        let args = Self::args(input, &input_file, language, options);
        tracing::debug!(binary = %self.binary.display(), ?args, "running code generator");

        let child = tokio::process::Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CodegenError::Generator(format!(
                        "'{}' not found; install it with `npm install -g quicktype` or set VCSR_QUICKTYPE_BIN",
                        self.binary.display()
                    ))
                } else {
                    CodegenError::Generator(format!("cannot start '{}': {e}", self.binary.display()))
                }
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CodegenError::Timeout(self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(status = %output.status, language = %language, "code generator failed");
            return Err(CodegenError::Generator(if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            }));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| CodegenError::Generator(format!("output is not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> GenerationInput {
        GenerationInput {
            type_name: "Person".into(),
            kind: InputKind::JsonSchema,
            content: json!({"type": "object"}),
            origin: None,
        }
    }

    #[test]
    fn default_args() {
        let args = QuicktypeCli::args(
            &input(),
            Path::new("/tmp/in.json"),
            Language::Go,
            &GenerationOptions::default(),
        );
        assert_eq!(
            args,
            [
                "--lang", "go", "--src-lang", "schema", "--top-level", "Person", "--just-types",
                "/tmp/in.json"
            ]
        );
    }

    #[test]
    fn optional_args_are_forwarded() {
        let options = GenerationOptions {
            just_types: false,
            acronym_style: AcronymStyle::Camel,
            package_name: Some("creds".into()),
            namespace: Some("Org.Creds".into()),
        };
        let mut sample = input();
        sample.kind = InputKind::JsonSample;
        let args = QuicktypeCli::args(&sample, Path::new("x.json"), Language::CSharp, &options);
        assert!(!args.contains(&"--just-types".to_string()));
        assert!(args.windows(2).any(|w| w == ["--src-lang", "json"]));
        assert!(args.windows(2).any(|w| w == ["--acronym-style", "camel"]));
        assert!(args.windows(2).any(|w| w == ["--package", "creds"]));
        assert!(args.windows(2).any(|w| w == ["--namespace", "Org.Creds"]));
        assert_eq!(args.last().map(String::as_str), Some("x.json"));
    }

    #[test]
    fn filename_uses_extension() {
        let code = GeneratedCode::new(Language::Python, "Person", String::new());
        assert_eq!(code.filename, "Person.py");
    }

    #[tokio::test]
    async fn missing_binary_is_generator_error() {
        let cli = QuicktypeCli::new("/nonexistent/quicktype-binary", Duration::from_secs(5));
        let err = cli
            .generate(&input(), Language::TypeScript, &GenerationOptions::default())
            .await
            .unwrap_err();
        match err {
            CodegenError::Generator(msg) => assert!(msg.contains("not found")),
            other => panic!("expected Generator error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stdout_becomes_code_and_nonzero_exit_fails() {
        // `echo` prints its arguments and exits 0; `false` exits 1.
        let echo = QuicktypeCli::new("echo", Duration::from_secs(5));
        let code = echo
            .generate(&input(), Language::Rust, &GenerationOptions::default())
            .await
            .unwrap();
        assert!(code.starts_with("--lang rust"));

        let failing = QuicktypeCli::new("false", Duration::from_secs(5));
        assert!(matches!(
            failing
                .generate(&input(), Language::Rust, &GenerationOptions::default())
                .await,
            Err(CodegenError::Generator(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_generator_times_out() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-quicktype");
        std::fs::write(&script, "#!/bin/sh\nsleep 5\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let cli = QuicktypeCli::new(&script, Duration::from_millis(100));
        let err = cli
            .generate(&input(), Language::Go, &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CodegenError::Timeout(_)));
    }
}
