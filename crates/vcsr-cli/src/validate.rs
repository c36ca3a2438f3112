//! # Validate CLI: Check a data file against a schema file.
//!
//! ```bash
//! vcsr validate --schema schemas/v1/PersonCredential.schema.json --data person.json
//! ```
//!
//! `$ref`s resolve against the other schemas in the schema file's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use vcsr_schema::{JsonSchemaEngine, SchemaRegistry, ValidationEngine, ValidationOutcome};

use crate::resolve_path;

/// Validate subcommand arguments.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// JSON Schema file.
    #[arg(long)]
    pub schema: PathBuf,

    /// JSON data file.
    #[arg(long)]
    pub data: PathBuf,
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Outcome of one validation run, before printing.
#[derive(Debug)]
pub enum Verdict {
    /// The schema did not compile.
    InvalidSchema(String),
    Checked(ValidationOutcome),
}

/// Compile the schema and evaluate the data.
pub fn check(schema_path: &Path, data_path: &Path) -> Result<Verdict> {
    let schema = read_json(schema_path)?;
    let data = read_json(data_path)?;

    let engine = match schema_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => JsonSchemaEngine::with_registry(&SchemaRegistry::new(vec![dir.to_path_buf()])),
        None => JsonSchemaEngine::new(),
    };
    Ok(match engine.validate(&schema, &data) {
        Ok(outcome) => Verdict::Checked(outcome),
        Err(e) => Verdict::InvalidSchema(e.to_string()),
    })
}

/// Execute the validate subcommand. Returns 1 unless the data is valid.
pub fn run_validate(args: &ValidateArgs, base: &Path) -> Result<u8> {
    let schema_path = resolve_path(&args.schema, base);
    let data_path = resolve_path(&args.data, base);

    match check(&schema_path, &data_path)? {
        Verdict::InvalidSchema(reason) => {
            println!("❌ invalid schema {}: {reason}", schema_path.display());
            Ok(1)
        }
        Verdict::Checked(outcome) if outcome.valid => {
            println!("✅ valid");
            Ok(0)
        }
        Verdict::Checked(outcome) => {
            for violation in &outcome.errors {
                println!("{violation}");
            }
            println!("❌ {} violation(s)", outcome.errors.len());
            Ok(1)
        }
    }
}
