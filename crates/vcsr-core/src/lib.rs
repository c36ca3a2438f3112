//! # vcsr-core: Foundational Types for the Credential Schema Registry
//!
//! Every other `vcsr-*` crate depends on this one; it depends on nothing
//! internal. It holds the vocabulary shared by the linter, the validation
//! boundary and the code-generation service.
//!
//! ## Contents
//!
//! - [`Issue`] and [`Severity`]: a single finding produced by a quality check.
//! - [`Dimension`]: the five quality dimensions a schema is scored on.
//! - [`SchemaView`]: defensive, never-panicking accessors over an untyped
//!   JSON Schema document (`serde_json::Value`).
//! - [`score`]: the rounding and averaging rules every score goes through.
//! - [`digest`]: content digests used to key cached generation output.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests. Absent nested paths are
//!   `None`, never an error.

pub mod digest;
pub mod dimension;
pub mod document;
pub mod error;
pub mod issue;
pub mod score;

pub use digest::sha256_hex;
pub use dimension::Dimension;
pub use document::{is_schema_file, parse_document, schema_stem, SchemaView, SCHEMA_FILE_SUFFIX};
pub use error::DocumentError;
pub use issue::{Issue, Severity};
