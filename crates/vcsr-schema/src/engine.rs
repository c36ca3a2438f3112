//! # Validation Engine Boundary
//!
//! JSON Schema compilation and evaluation are delegated to the `jsonschema`
//! crate. This module only defines the boundary and normalizes results:
//!
//! ```text
//! ValidationEngine::compile(schema) -> CompiledSchema
//! CompiledSchema::evaluate(data)    -> ValidationOutcome { valid, errors[] }
//! ```
//!
//! A schema that fails to compile is a [`SchemaError`], kept distinct from
//! data that fails validation, which is a successful evaluation with
//! `valid == false`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jsonschema::{Retrieve, Uri, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::registry::SchemaRegistry;

/// A schema could not be compiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The document is not a valid JSON Schema, or a reference in it cannot
    /// be resolved.
    #[error("{reason}")]
    Compile { reason: String },
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Human-readable description.
    pub message: String,
    /// JSON Pointer to the violating value in the instance (`""` for root).
    pub instance_path: String,
    /// JSON Pointer fragment to the schema keyword that failed.
    pub schema_path: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Result of evaluating data against a compiled schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<Violation>,
}

impl ValidationOutcome {
    fn from_violations(errors: Vec<Violation>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// A compiled, reusable schema.
pub trait CompiledSchema: Send + Sync {
    fn evaluate(&self, instance: &Value) -> ValidationOutcome;
}

/// Compiles schema documents into [`CompiledSchema`]s.
pub trait ValidationEngine: Send + Sync {
    fn compile(&self, schema: &Value) -> Result<Box<dyn CompiledSchema>, SchemaError>;

    /// Compile `schema` and evaluate `instance` in one step.
    fn validate(&self, schema: &Value, instance: &Value) -> Result<ValidationOutcome, SchemaError> {
        Ok(self.compile(schema)?.evaluate(instance))
    }
}

/// Resolves `$ref` URIs against schemas already loaded from the registry.
///
/// Remote documents are never fetched; an unknown URI is a compile error.
struct RegistryRetriever {
    schemas_by_uri: Arc<HashMap<String, Value>>,
}

impl Retrieve for RegistryRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Relative refs such as `./Address.schema.json` arrive as absolute
        // URIs against the base; match on the final path segment.
        let file_name = uri_str
            .split(['#', '?'])
            .next()
            .and_then(|s| s.rsplit('/').next())
            .unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(file_name) {
            return Ok(value.clone());
        }

        Err(format!("cannot resolve reference '{uri_str}': not in the local registry").into())
    }
}

/// [`ValidationEngine`] backed by the `jsonschema` crate.
///
/// Format assertions are enabled. The draft is taken from each schema's
/// `$schema` keyword.
#[derive(Clone, Default)]
pub struct JsonSchemaEngine {
    schemas_by_uri: Arc<HashMap<String, Value>>,
}

impl fmt::Debug for JsonSchemaEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaEngine")
            .field("known_references", &self.schemas_by_uri.len())
            .finish()
    }
}

impl JsonSchemaEngine {
    /// An engine with no resolvable external references.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that resolves `$ref`s against every schema in `registry`.
    ///
    /// Each schema is indexed under its `$id` (when present) and its file name.
    pub fn with_registry(registry: &SchemaRegistry) -> Self {
        let mut schemas_by_uri = HashMap::new();
        for schema in registry.load_all() {
            if let Some(id) = schema.document.get("$id").and_then(Value::as_str) {
                schemas_by_uri.insert(id.to_string(), schema.document.clone());
            }
            if let Some(name) = schema.path.file_name().and_then(|n| n.to_str()) {
                schemas_by_uri.insert(name.to_string(), schema.document.clone());
            }
        }
        tracing::debug!(references = schemas_by_uri.len(), "indexed registry schemas for $ref resolution");
        Self {
            schemas_by_uri: Arc::new(schemas_by_uri),
        }
    }

    pub fn known_references(&self) -> usize {
        self.schemas_by_uri.len()
    }
}

struct JsonSchemaValidator {
    validator: Validator,
}

impl CompiledSchema for JsonSchemaValidator {
    fn evaluate(&self, instance: &Value) -> ValidationOutcome {
        let errors = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                message: e.to_string(),
                instance_path: e.instance_path.to_string(),
                schema_path: format!("#{}", e.schema_path),
            })
            .collect();
        ValidationOutcome::from_violations(errors)
    }
}

impl ValidationEngine for JsonSchemaEngine {
    fn compile(&self, schema: &Value) -> Result<Box<dyn CompiledSchema>, SchemaError> {
        let mut opts = jsonschema::options();
        opts.should_validate_formats(true);
        opts.with_retriever(RegistryRetriever {
            schemas_by_uri: Arc::clone(&self.schemas_by_uri),
        });
        let validator = opts.build(schema).map_err(|e| SchemaError::Compile {
            reason: e.to_string(),
        })?;
        Ok(Box::new(JsonSchemaValidator { validator }))
    }
}
