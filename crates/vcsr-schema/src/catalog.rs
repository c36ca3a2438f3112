//! # Schema Catalog
//!
//! Browsing summaries for registry schemas. A summary is built from the
//! schema document itself, overridden field by field by an optional
//! `<id>.metadata.json` sidecar next to the schema file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::RegistrySchema;

/// Sidecar file suffix holding hand-written catalog metadata.
pub const METADATA_FILE_SUFFIX: &str = ".metadata.json";

/// Browsing category of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaCategory {
    Identity,
    Business,
    Content,
    Trust,
    Payments,
    Platform,
}

/// Keyword groups checked in order; the first group with a hit wins.
const CATEGORY_KEYWORDS: &[(SchemaCategory, &[&str])] = &[
    (SchemaCategory::Identity, &["person", "identity", "did"]),
    (SchemaCategory::Business, &["contract", "business", "organization"]),
    (SchemaCategory::Content, &["content", "media", "c2pa"]),
    (SchemaCategory::Trust, &["trust", "credential", "verification"]),
    (SchemaCategory::Payments, &["payment", "billing", "invoice"]),
];

impl SchemaCategory {
    /// Guess a category from the schema's title and description.
    pub fn infer(document: &Value) -> Self {
        let text = format!(
            "{} {}",
            document.get("title").and_then(Value::as_str).unwrap_or_default(),
            document.get("description").and_then(Value::as_str).unwrap_or_default()
        )
        .to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| text.contains(w)))
            .map(|(category, _)| *category)
            .unwrap_or(SchemaCategory::Platform)
    }
}

/// Catalog entry for one registry schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSummary {
    /// Registry id (file stem).
    pub id: String,
    /// Source directory name.
    pub source: String,
    pub title: String,
    pub description: Option<String>,
    pub category: SchemaCategory,
    pub tags: Vec<String>,
    pub version: Option<String>,
    /// Schema file name within its source.
    pub filename: String,
}

/// Fields a sidecar may override. Missing fields keep the derived value.
#[derive(Debug, Default, Deserialize)]
struct SidecarMetadata {
    title: Option<String>,
    description: Option<String>,
    category: Option<SchemaCategory>,
    tags: Option<Vec<String>>,
    version: Option<String>,
}

fn read_sidecar(schema: &RegistrySchema) -> Option<SidecarMetadata> {
    let path = schema
        .path
        .with_file_name(format!("{}{METADATA_FILE_SUFFIX}", schema.id));
    let text = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&text) {
        Ok(meta) => Some(meta),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed schema metadata");
            None
        }
    }
}

fn string_field(document: &Value, key: &str) -> Option<String> {
    document.get(key).and_then(Value::as_str).map(str::to_string)
}

impl SchemaSummary {
    /// Summarize a loaded schema, applying its sidecar when present.
    pub fn from_registry(schema: &RegistrySchema) -> Self {
        let doc = &schema.document;
        let tags = doc
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();
        let mut summary = SchemaSummary {
            id: schema.id.clone(),
            source: schema.source.clone(),
            title: string_field(doc, "title").unwrap_or_else(|| schema.id.clone()),
            description: string_field(doc, "description"),
            category: SchemaCategory::infer(doc),
            tags,
            version: string_field(doc, "version"),
            filename: schema
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        if let Some(meta) = read_sidecar(schema) {
            if let Some(title) = meta.title {
                summary.title = title;
            }
            if meta.description.is_some() {
                summary.description = meta.description;
            }
            if let Some(category) = meta.category {
                summary.category = category;
            }
            if let Some(tags) = meta.tags {
                summary.tags = tags;
            }
            if meta.version.is_some() {
                summary.version = meta.version;
            }
        }
        summary
    }
}
