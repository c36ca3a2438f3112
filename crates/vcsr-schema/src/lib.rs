//! # vcsr-schema: JSON Schema Boundary and Registry
//!
//! Two concerns live here:
//!
//! - **Validation** ([`engine`]): a narrow `compile(schema) -> CompiledSchema`,
//!   `evaluate(data) -> ValidationOutcome` boundary. [`JsonSchemaEngine`] is the
//!   production implementation backed by the `jsonschema` crate; callers hold
//!   an `Arc<dyn ValidationEngine>` so tests can inject their own.
//!
//! - **Registry** ([`registry`]): the directory tree of `*.schema.json` files
//!   the service publishes. Schemas are looked up by id (the file stem) across
//!   the configured directories, then the documentation-site mirror.
//!   [`catalog`] turns loaded schemas into browsing summaries.
//!
//! ## Reference Resolution
//!
//! `$ref`s resolve only against schemas loaded from the registry, matched by
//! `$id` or by file name. Nothing is fetched over the network; an unresolvable
//! reference is a compile error.

pub mod catalog;
pub mod engine;
pub mod registry;

pub use engine::{
    CompiledSchema, JsonSchemaEngine, SchemaError, ValidationEngine, ValidationOutcome, Violation,
};
pub use catalog::{SchemaCategory, SchemaSummary};
pub use registry::{RegistryError, RegistrySchema, SchemaRegistry, SchemaSource};
