//! # Schema Sources
//!
//! Turns a request's schema reference into a [`ResolvedSource`]: the
//! generator input plus the identifier used for cache keys.
//!
//! | Source | Identifier |
//! |--------|------------|
//! | registry id | `registry:<id>` |
//! | URL | the URL |
//! | uploaded file | `upload:<first 16 hex of sha256(kind, type name, content)>` |

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;
use vcsr_core::{schema_stem, sha256_hex};
use vcsr_schema::SchemaRegistry;

use crate::error::CodegenError;
use crate::generator::{GenerationInput, InputKind};
use crate::typescript::interface_to_schema;

/// Declared format of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadType {
    JsonSchema,
    Json,
    Typescript,
    #[default]
    Unknown,
}

/// A file submitted for generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: UploadType,
}

/// A schema ready for the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSource {
    /// Stable identifier, the first half of the cache key.
    pub source_id: String,
    pub input: GenerationInput,
}

/// Fallback when a name has no usable characters.
const DEFAULT_TYPE_NAME: &str = "Generated";

/// Turn a title or file stem into a PascalCase type name.
///
/// `"Person Credential"` → `"PersonCredential"`, `"person-credential"` →
/// `"PersonCredential"`. Names that are already identifiers keep their case.
pub fn sanitize_type_name(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    for word in raw.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.push_str(chars.as_str());
        }
    }
    if name.is_empty() {
        DEFAULT_TYPE_NAME.to_string()
    } else {
        name
    }
}

fn schema_type_name(document: &Value, file_name: &str) -> String {
    let raw = document
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| schema_stem(file_name));
    sanitize_type_name(raw)
}

/// Resolve a registry id.
///
/// The registry file itself is handed to the generator so that relative
/// `$ref`s next to it resolve. The id names the top-level type.
pub fn resolve_registry(registry: &SchemaRegistry, id: &str) -> Result<ResolvedSource, CodegenError> {
    let schema = registry.load(id)?;
    Ok(ResolvedSource {
        source_id: format!("registry:{id}"),
        input: GenerationInput {
            type_name: sanitize_type_name(id),
            kind: InputKind::JsonSchema,
            content: schema.document,
            origin: Some(schema.path),
        },
    })
}

/// Resolve a schema file on local disk.
///
/// The file is passed to the generator as-is, so relative `$ref`s resolve.
/// The type name comes from the schema `title`, else the file name.
pub fn resolve_schema_file(path: &Path) -> Result<ResolvedSource, CodegenError> {
    let text = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&text).map_err(|e| {
        CodegenError::InvalidSource(format!("{} is not valid JSON: {e}", path.display()))
    })?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_TYPE_NAME);
    Ok(ResolvedSource {
        source_id: format!("file:{}", path.display()),
        input: GenerationInput {
            type_name: schema_type_name(&document, file_name),
            kind: InputKind::JsonSchema,
            content: document,
            origin: Some(path.to_path_buf()),
        },
    })
}

/// Fetches schemas by URL.
#[derive(Debug, Clone)]
pub struct SchemaFetcher {
    client: reqwest::Client,
}

impl SchemaFetcher {
    pub fn new(timeout: Duration) -> Result<Self, CodegenError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CodegenError::Fetch {
                url: String::new(),
                reason: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch and parse a schema. Only `http` and `https` are accepted.
    pub async fn fetch(&self, raw_url: &str) -> Result<ResolvedSource, CodegenError> {
        let url = Url::parse(raw_url)
            .map_err(|e| CodegenError::InvalidSource(format!("invalid URL '{raw_url}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CodegenError::InvalidSource(format!(
                "unsupported URL scheme '{}'",
                url.scheme()
            )));
        }

        let fetch_err = |reason: String| CodegenError::Fetch {
            url: raw_url.to_string(),
            reason,
        };
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("server returned {status}")));
        }
        let body = response.text().await.map_err(|e| fetch_err(e.to_string()))?;
        let document: Value = serde_json::from_str(&body).map_err(|e| {
            CodegenError::InvalidSource(format!("response from '{raw_url}' is not JSON: {e}"))
        })?;
        tracing::debug!(url = %url, "fetched schema");

        let file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_TYPE_NAME);
        Ok(ResolvedSource {
            source_id: raw_url.to_string(),
            input: GenerationInput {
                type_name: schema_type_name(&document, file_name),
                kind: InputKind::JsonSchema,
                content: document,
                origin: None,
            },
        })
    }
}

/// Resolve an uploaded file, auto-detecting [`UploadType::Unknown`].
pub fn resolve_upload(file: &UploadedFile) -> Result<ResolvedSource, CodegenError> {
    if file.content.trim().is_empty() {
        return Err(CodegenError::InvalidSource(format!(
            "Empty file content for {}",
            file.name
        )));
    }
    let stem_name = || sanitize_type_name(schema_stem(&file.name));

    let parse = || {
        serde_json::from_str::<Value>(&file.content).map_err(|e| {
            CodegenError::InvalidSource(format!("{} is not valid JSON: {e}", file.name))
        })
    };

    let input = match file.kind {
        UploadType::JsonSchema => {
            let document = parse()?;
            schema_input(document, &file.name)
        }
        UploadType::Json => sample_input(parse()?, stem_name()),
        UploadType::Typescript => typescript_input(&file.content, stem_name(), &file.name)?,
        UploadType::Unknown => match serde_json::from_str::<Value>(&file.content) {
            Ok(document) if looks_like_schema(&document) => schema_input(document, &file.name),
            Ok(document) => sample_input(document, stem_name()),
            Err(_) if file.content.contains("interface") || file.content.contains("type") => {
                typescript_input(&file.content, stem_name(), &file.name)?
            }
            Err(_) => return Err(CodegenError::UndetectableInput(file.name.clone())),
        },
    };

    Ok(ResolvedSource {
        source_id: upload_id(&input),
        input,
    })
}

/// Identity of a resolved upload. The file name only counts through the
/// type name it produces, so renamed copies of one file share an id.
fn upload_id(input: &GenerationInput) -> String {
    let material = format!(
        "{}\n{}\n{}",
        input.kind.as_arg(),
        input.type_name,
        input.content
    );
    let digest = sha256_hex(material.as_bytes());
    format!("upload:{}", &digest[..16])
}

fn looks_like_schema(document: &Value) -> bool {
    ["$schema", "type", "properties"]
        .iter()
        .any(|k| document.get(k).is_some_and(|v| !v.is_null()))
}

fn schema_input(document: Value, file_name: &str) -> GenerationInput {
    GenerationInput {
        type_name: schema_type_name(&document, file_name),
        kind: InputKind::JsonSchema,
        content: document,
        origin: None,
    }
}

fn sample_input(document: Value, type_name: String) -> GenerationInput {
    GenerationInput {
        type_name,
        kind: InputKind::JsonSample,
        content: document,
        origin: None,
    }
}

fn typescript_input(
    source: &str,
    type_name: String,
    file_name: &str,
) -> Result<GenerationInput, CodegenError> {
    let schema = interface_to_schema(source, &type_name).ok_or_else(|| {
        CodegenError::InvalidSource(format!("No TypeScript interfaces found in {file_name}"))
    })?;
    Ok(GenerationInput {
        type_name,
        kind: InputKind::JsonSchema,
        content: schema,
        origin: None,
    })
}
