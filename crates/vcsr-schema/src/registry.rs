//! # Schema Registry
//!
//! A registry is an ordered list of directories holding `*.schema.json`
//! files, plus an optional fallback mirror (the documentation site's public
//! copy). A schema's id is its file name without `.schema.json`. Each
//! directory is also a named source (its final path component) that can be
//! browsed on its own.
//!
//! Lookups read from disk on every call so edits to the registry are picked
//! up without a restart.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use vcsr_core::{is_schema_file, parse_document, schema_stem, SCHEMA_FILE_SUFFIX};

/// Error resolving or loading a registry schema.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The id contains characters that could escape the registry directories.
    #[error("invalid schema id '{0}': only letters, digits, '.', '_' and '-' are allowed")]
    InvalidId(String),

    /// No directory holds a schema with this id.
    #[error("schema '{0}' not found in registry")]
    NotFound(String),

    /// No registry directory has this source name.
    #[error("schema source '{0}' not found")]
    UnknownSource(String),

    /// The schema file exists but could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not valid JSON.
    #[error("invalid JSON in '{path}': {reason}")]
    Parse { path: String, reason: String },
}

/// A schema loaded from the registry.
#[derive(Debug, Clone)]
pub struct RegistrySchema {
    /// Registry id (file stem).
    pub id: String,
    /// Name of the source directory it was found in.
    pub source: String,
    /// File the schema was loaded from.
    pub path: PathBuf,
    /// Parsed document.
    pub document: Value,
}

/// A named registry directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSource {
    pub name: String,
    pub dir: PathBuf,
}

/// Source name of a directory: its final path component.
fn source_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// The on-disk schema registry.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    roots: Vec<PathBuf>,
    fallback: Option<PathBuf>,
}

impl SchemaRegistry {
    /// Create a registry over `roots`, searched in order.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            fallback: None,
        }
    }

    /// Add a fallback directory searched after all roots.
    pub fn with_fallback(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fallback = Some(dir.into());
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn fallback(&self) -> Option<&Path> {
        self.fallback.as_deref()
    }

    /// Every directory in search order: roots, then the fallback.
    pub fn search_path(&self) -> impl Iterator<Item = &Path> {
        self.roots
            .iter()
            .map(PathBuf::as_path)
            .chain(self.fallback.as_deref())
    }

    /// Number of configured roots that currently exist as directories.
    pub fn readable_roots(&self) -> usize {
        self.roots.iter().filter(|r| r.is_dir()).count()
    }

    /// Reject ids that are empty, contain path separators or `..`.
    pub fn validate_id(id: &str) -> Result<(), RegistryError> {
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
        if id.is_empty() || id.contains("..") || !id.chars().all(allowed) {
            return Err(RegistryError::InvalidId(id.to_string()));
        }
        Ok(())
    }

    /// Path of the first file named `<id>.schema.json` along the search path.
    pub fn locate(&self, id: &str) -> Result<PathBuf, RegistryError> {
        Self::validate_id(id)?;
        let file_name = format!("{id}{SCHEMA_FILE_SUFFIX}");
        self.search_path()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Locate, read and parse the schema with this id.
    pub fn load(&self, id: &str) -> Result<RegistrySchema, RegistryError> {
        let path = self.locate(id)?;
        let source = path.parent().map(source_name).unwrap_or_default();
        let document = read_schema(&path)?;
        tracing::debug!(id, path = %path.display(), "loaded registry schema");
        Ok(RegistrySchema {
            id: id.to_string(),
            source,
            path,
            document,
        })
    }

    /// Named sources in search order. When two directories share a name,
    /// the earlier one owns it.
    pub fn sources(&self) -> Vec<SchemaSource> {
        let mut sources: Vec<SchemaSource> = Vec::new();
        for dir in self.search_path() {
            let name = source_name(dir);
            if sources.iter().all(|s| s.name != name) {
                sources.push(SchemaSource {
                    name,
                    dir: dir.to_path_buf(),
                });
            }
        }
        sources
    }

    fn source_dir(&self, source: &str) -> Result<PathBuf, RegistryError> {
        self.sources()
            .into_iter()
            .find(|s| s.name == source)
            .map(|s| s.dir)
            .ok_or_else(|| RegistryError::UnknownSource(source.to_string()))
    }

    /// Load the schema `id` from one named source, ignoring the others.
    pub fn load_from(&self, source: &str, id: &str) -> Result<RegistrySchema, RegistryError> {
        Self::validate_id(id)?;
        let dir = self.source_dir(source)?;
        let path = dir.join(format!("{id}{SCHEMA_FILE_SUFFIX}"));
        if !path.is_file() {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        let document = read_schema(&path)?;
        Ok(RegistrySchema {
            id: id.to_string(),
            source: source.to_string(),
            path,
            document,
        })
    }

    /// Every parseable schema in one named source, sorted by id.
    pub fn load_source(&self, source: &str) -> Result<Vec<RegistrySchema>, RegistryError> {
        let dir = self.source_dir(source)?;
        Ok(schema_files_in(&dir)
            .into_iter()
            .filter_map(|path| load_file(source, path))
            .collect())
    }

    /// Load every parseable schema along the search path.
    ///
    /// The first directory to provide an id wins. Unparseable files are
    /// skipped with a warning.
    pub fn load_all(&self) -> Vec<RegistrySchema> {
        let mut by_id: BTreeMap<String, RegistrySchema> = BTreeMap::new();
        for dir in self.search_path() {
            for path in schema_files_in(dir) {
                let Some(id) = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| schema_stem(n).to_string())
                else {
                    continue;
                };
                if by_id.contains_key(&id) {
                    continue;
                }
                if let Some(schema) = load_file(&source_name(dir), path) {
                    by_id.insert(id, schema);
                }
            }
        }
        by_id.into_values().collect()
    }
}

/// Read one registry file. Unreadable or unparseable files are logged and
/// skipped.
fn load_file(source: &str, path: PathBuf) -> Option<RegistrySchema> {
    let id = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| schema_stem(n).to_string())?;
    match read_schema(&path) {
        Ok(document) => Some(RegistrySchema {
            id,
            source: source.to_string(),
            path,
            document,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "skipping unreadable registry schema");
            None
        }
    }
}

/// Sorted `*.schema.json` files directly inside `dir`. Unreadable directories
/// yield nothing.
fn schema_files_in(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "registry directory not readable");
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(is_schema_file)
        })
        .collect();
    files.sort();
    files
}

fn read_schema(path: &Path) -> Result<Value, RegistryError> {
    let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&text).map_err(|e| RegistryError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_schema(dir: &Path, id: &str, value: &Value) {
        std::fs::write(
            dir.join(format!("{id}.schema.json")),
            serde_json::to_string_pretty(value).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn validate_id_rejects_traversal() {
        assert!(SchemaRegistry::validate_id("PersonCredential").is_ok());
        assert!(SchemaRegistry::validate_id("ov.person-v1_2").is_ok());
        assert!(SchemaRegistry::validate_id("").is_err());
        assert!(SchemaRegistry::validate_id("../etc/passwd").is_err());
        assert!(SchemaRegistry::validate_id("a/b").is_err());
        assert!(SchemaRegistry::validate_id("a..b").is_err());
    }

    #[test]
    fn load_from_first_root() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(dir.path(), "Person", &json!({"title": "Person"}));
        let registry = SchemaRegistry::new(vec![dir.path().to_path_buf()]);
        let schema = registry.load("Person").unwrap();
        assert_eq!(schema.id, "Person");
        assert_eq!(schema.document["title"], "Person");
    }

    #[test]
    fn load_falls_back_to_mirror() {
        let primary = tempfile::tempdir().unwrap();
        let mirror = tempfile::tempdir().unwrap();
        write_schema(mirror.path(), "Org", &json!({"title": "Org"}));
        let registry =
            SchemaRegistry::new(vec![primary.path().to_path_buf()]).with_fallback(mirror.path());
        let schema = registry.load("Org").unwrap();
        assert!(schema.path.starts_with(mirror.path()));
    }

    #[test]
    fn roots_take_precedence_over_fallback() {
        let primary = tempfile::tempdir().unwrap();
        let mirror = tempfile::tempdir().unwrap();
        write_schema(primary.path(), "Org", &json!({"title": "primary"}));
        write_schema(mirror.path(), "Org", &json!({"title": "mirror"}));
        let registry =
            SchemaRegistry::new(vec![primary.path().to_path_buf()]).with_fallback(mirror.path());
        assert_eq!(registry.load("Org").unwrap().document["title"], "primary");
        assert_eq!(registry.load_all().len(), 1);
        assert_eq!(registry.load_all()[0].document["title"], "primary");
    }

    #[test]
    fn missing_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let registry = SchemaRegistry::new(vec![dir.path().to_path_buf()]);
        assert!(matches!(
            registry.load("Nope"),
            Err(RegistryError::NotFound(id)) if id == "Nope"
        ));
    }

    #[test]
    fn nonexistent_root_is_tolerated() {
        let registry = SchemaRegistry::new(vec![PathBuf::from("/nonexistent/vcsr/schemas")]);
        assert!(registry.load_source("schemas").unwrap().is_empty());
        assert!(registry.load_all().is_empty());
        assert_eq!(registry.readable_roots(), 0);
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Broken.schema.json"), "{ not json").unwrap();
        let registry = SchemaRegistry::new(vec![dir.path().to_path_buf()]);
        assert!(matches!(registry.load("Broken"), Err(RegistryError::Parse { .. })));
        assert!(registry.load_all().is_empty());
    }

    #[test]
    fn load_source_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(dir.path(), "B", &json!({}));
        write_schema(dir.path(), "A", &json!({}));
        std::fs::write(dir.path().join("notes.json"), "{}").unwrap();
        let registry = SchemaRegistry::new(vec![dir.path().to_path_buf()]);
        let name = source_name(dir.path());
        let ids: Vec<String> = registry
            .load_source(&name)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn sources_are_named_by_directory() {
        let root = tempfile::tempdir().unwrap();
        let v1 = root.path().join("v1");
        let drafts = root.path().join("drafts");
        let mirror = root.path().join("mirror").join("v1");
        for dir in [&v1, &drafts, &mirror] {
            std::fs::create_dir_all(dir).unwrap();
        }
        write_schema(&v1, "Person", &json!({"title": "released"}));
        write_schema(&drafts, "Person", &json!({"title": "draft"}));

        let registry = SchemaRegistry::new(vec![v1.clone(), drafts.clone()]).with_fallback(&mirror);
        let names: Vec<String> = registry.sources().into_iter().map(|s| s.name).collect();
        // The mirror's "v1" is shadowed by the first root.
        assert_eq!(names, vec!["v1".to_string(), "drafts".to_string()]);

        assert_eq!(registry.load("Person").unwrap().source, "v1");
        let draft = registry.load_from("drafts", "Person").unwrap();
        assert_eq!(draft.document["title"], "draft");
        assert_eq!(draft.source, "drafts");
    }

    #[test]
    fn load_from_errors() {
        let dir = tempfile::tempdir().unwrap();
        let registry = SchemaRegistry::new(vec![dir.path().to_path_buf()]);
        let name = source_name(dir.path());
        assert!(matches!(
            registry.load_from("elsewhere", "Person"),
            Err(RegistryError::UnknownSource(s)) if s == "elsewhere"
        ));
        assert!(matches!(
            registry.load_from(&name, "Person"),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            registry.load_from(&name, "../x"),
            Err(RegistryError::InvalidId(_))
        ));
        assert!(matches!(
            registry.load_source("elsewhere"),
            Err(RegistryError::UnknownSource(_))
        ));
    }
}
