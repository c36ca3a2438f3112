//! # vcsr-cli: Command Line for the Credential Schema Registry
//!
//! ## Subcommands
//!
//! - `vcsr lint` (the default): score every schema and write the report.
//! - `vcsr validate`: check a data file against a schema file.
//! - `vcsr generate`: emit type bindings for a schema file.
//!
//! ```bash
//! vcsr
//! vcsr lint --dir schemas/v1 --output report.json --json
//! vcsr validate --schema PersonCredential.schema.json --data person.json
//! vcsr generate --schema PersonCredential.schema.json --lang rust --out gen/
//! ```
//!
//! Every subcommand returns an exit code: 0 on success, 1 when a schema
//! failed, the data is invalid, or the command itself failed.

pub mod generate;
pub mod lint;
pub mod validate;

use std::path::{Path, PathBuf};

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
