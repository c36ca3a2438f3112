//! # vcsr-codegen: Type Bindings for Registry Schemas
//!
//! Generates source code in eleven languages from a schema taken from the
//! registry, a URL or an uploaded file. Emission itself is delegated to an
//! external engine behind [`CodeGenerator`]; [`QuicktypeCli`] is the
//! production backend.
//!
//! ```text
//! registry id ─┐
//! URL ─────────┼─▶ ResolvedSource ─▶ cache ─▶ CodeGenerator ─▶ GeneratedCode
//! upload ──────┘                                                   │
//!                                                     build_archive ◀┘
//! ```

pub mod archive;
pub mod batch;
pub mod cache;
pub mod error;
pub mod generator;
pub mod language;
pub mod options;
pub mod service;
pub mod source;
pub mod typescript;

pub use archive::{archive_file_name, build_archive};
pub use batch::{default_batch_concurrency, error_stub, generate_batch, BatchOutcome};
pub use cache::{cache_key, GenerationCache};
pub use error::CodegenError;
pub use generator::{CodeGenerator, GeneratedCode, GenerationInput, InputKind, QuicktypeCli};
pub use language::Language;
pub use options::{AcronymStyle, GenerationOptions};
pub use service::{CodegenService, Generation};
pub use source::{
    resolve_registry, resolve_schema_file, resolve_upload, sanitize_type_name, ResolvedSource,
    SchemaFetcher, UploadType, UploadedFile,
};
