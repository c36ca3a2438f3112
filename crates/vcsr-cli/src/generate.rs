//! # Generate CLI: Emit type bindings for a schema file.
//!
//! ```bash
//! vcsr generate --schema schemas/v1/PersonCredential.schema.json --lang rust
//! vcsr generate --schema Person.schema.json --lang kotlin --package org.example --out gen/
//! ```
//!
//! Generation runs through quicktype. Without `--out` the code goes to
//! stdout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use vcsr_codegen::{
    resolve_schema_file, CodeGenerator, GeneratedCode, GenerationOptions, Language, QuicktypeCli,
};

use crate::resolve_path;

/// Generate subcommand arguments.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// JSON Schema file.
    #[arg(long)]
    pub schema: PathBuf,

    /// Target language id (typescript, python, go, csharp, java, rust,
    /// swift, kotlin, php, ruby, javascript).
    #[arg(long)]
    pub lang: String,

    /// Directory to write `<Name>.<ext>` into. Prints to stdout when absent.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Also emit (de)serialization helpers.
    #[arg(long)]
    pub no_just_types: bool,

    /// Package name for languages that use one.
    #[arg(long)]
    pub package: Option<String>,

    /// Namespace for languages that use one.
    #[arg(long)]
    pub namespace: Option<String>,

    /// quicktype executable.
    #[arg(long, default_value = "quicktype")]
    pub quicktype: PathBuf,

    /// Seconds before the generator is killed.
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,
}

impl GenerateArgs {
    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            just_types: !self.no_just_types,
            package_name: self.package.clone(),
            namespace: self.namespace.clone(),
            ..GenerationOptions::default()
        }
    }
}

fn parse_language(raw: &str) -> Result<Language> {
    raw.parse::<Language>().map_err(|e| {
        anyhow::anyhow!("{e}; supported: {}", Language::supported_ids().join(", "))
    })
}

/// Run `generator` over the schema file at `schema_path`.
pub async fn generate_file(
    generator: &dyn CodeGenerator,
    schema_path: &Path,
    language: Language,
    options: &GenerationOptions,
) -> Result<GeneratedCode> {
    let source = resolve_schema_file(schema_path)
        .with_context(|| format!("cannot use {} as a schema", schema_path.display()))?;
    let code = generator
        .generate(&source.input, language, options)
        .await
        .with_context(|| format!("generation failed for {}", schema_path.display()))?;
    Ok(GeneratedCode::new(language, &source.input.type_name, code))
}

/// Execute the generate subcommand.
pub async fn run_generate(args: &GenerateArgs, base: &Path) -> Result<u8> {
    let language = parse_language(&args.lang)?;
    let generator = QuicktypeCli::new(args.quicktype.clone(), Duration::from_secs(args.timeout_secs));
    let schema_path = resolve_path(&args.schema, base);

    let result = generate_file(&generator, &schema_path, language, &args.options()).await?;

    match &args.out {
        Some(out) => {
            let dir = resolve_path(out, base);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            let path = dir.join(&result.filename);
            std::fs::write(&path, &result.code)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {} ({})", path.display(), language.display_name());
        }
        None => print!("{}", result.code),
    }
    Ok(0)
}
