//! # API Route Modules
//!
//! - `schemas`: browsing registry schemas by source.
//! - `validate`: data validation against an inline or registry schema.
//! - `codegen`: type-binding generation, the generation cache and zip
//!   downloads under `/api/quicktype`.

pub mod codegen;
pub mod schemas;
pub mod validate;
