//! # Schema Documents
//!
//! A schema document is any JSON value. Nothing about its shape is trusted:
//! `properties` may be missing or not an object, `items.enum` may hold
//! numbers, `required` may be a string. [`SchemaView`] answers the questions
//! the checks ask and returns `None`/`false` for every absent or mistyped
//! path instead of failing.
//!
//! "Present" follows one rule throughout: the key exists and its value is
//! not `null`, `false` or the empty string. A boolean sub-schema of `false`
//! therefore counts as absent, while `"minimum": 0` counts as present.

use serde_json::{Map, Value};

use crate::error::DocumentError;

/// File-name suffix of registry schema files.
pub const SCHEMA_FILE_SUFFIX: &str = ".schema.json";

/// Whether a file name follows the registry naming convention.
pub fn is_schema_file(file_name: &str) -> bool {
    file_name.len() > SCHEMA_FILE_SUFFIX.len() && file_name.ends_with(SCHEMA_FILE_SUFFIX)
}

/// Strip `.schema.json` from a file name, or else its last extension.
///
/// `"PersonCredential.schema.json"` → `"PersonCredential"`,
/// `"sample.json"` → `"sample"`, `"README"` → `"README"`.
pub fn schema_stem(file_name: &str) -> &str {
    if let Some(stem) = file_name.strip_suffix(SCHEMA_FILE_SUFFIX) {
        if !stem.is_empty() {
            return stem;
        }
    }
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

/// Parse document text into a JSON value.
pub fn parse_document(text: &str) -> Result<Value, DocumentError> {
    Ok(serde_json::from_str(text)?)
}

/// Presence rule shared by every accessor.
fn present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Read-only view over a schema document.
#[derive(Debug, Clone, Copy)]
pub struct SchemaView<'a> {
    root: &'a Value,
}

impl<'a> SchemaView<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// The underlying value.
    pub fn value(&self) -> &'a Value {
        self.root
    }

    /// Whether a top-level keyword is present.
    pub fn has(&self, keyword: &str) -> bool {
        present(self.root.get(keyword))
    }

    /// A top-level keyword's value when it is a non-empty string.
    pub fn string(&self, keyword: &str) -> Option<&'a str> {
        self.root
            .get(keyword)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The schema `title`, when it is a non-empty string.
    pub fn title(&self) -> Option<&'a str> {
        self.string("title")
    }

    /// The `properties` object, if the document has one.
    pub fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.root.get("properties").and_then(Value::as_object)
    }

    /// Whether a `properties` object exists (it may be empty).
    pub fn has_properties(&self) -> bool {
        self.properties().is_some()
    }

    /// A declared property's sub-schema, when present.
    pub fn property(&self, name: &str) -> Option<&'a Value> {
        self.properties()
            .and_then(|props| props.get(name))
            .filter(|v| present(Some(v)))
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// Declared property names, in document order.
    pub fn property_keys(&self) -> impl Iterator<Item = &'a str> {
        self.properties()
            .into_iter()
            .flat_map(|props| props.keys().map(String::as_str))
    }

    /// Whether any declared property key, lowercased, contains `needle`.
    ///
    /// The needle is used as written, so a needle with capitals never
    /// matches.
    pub fn any_key_contains(&self, needle: &str) -> bool {
        self.property_keys()
            .any(|key| key.to_lowercase().contains(needle))
    }

    /// The `items.enum` array of a property.
    ///
    /// `None` when the property, its `items` or the `enum` is missing or the
    /// `enum` is not an array. Non-string entries are skipped.
    pub fn property_item_enum(&self, name: &str) -> Option<Vec<&'a str>> {
        let values = self
            .property(name)?
            .get("items")?
            .get("enum")?
            .as_array()?;
        Some(values.iter().filter_map(Value::as_str).collect())
    }

    /// Follow a path of object keys from the root.
    pub fn lookup(&self, path: &[&str]) -> Option<&'a Value> {
        let mut current = self.root;
        for key in path {
            current = current.get(*key)?;
        }
        present(Some(current)).then_some(current)
    }

    /// Whether the top-level `required` is a non-empty array.
    pub fn has_required_fields(&self) -> bool {
        self.root
            .get("required")
            .and_then(Value::as_array)
            .is_some_and(|r| !r.is_empty())
    }

    /// Whether any declared property carries `keyword`.
    pub fn any_property_has(&self, keyword: &str) -> bool {
        self.properties()
            .is_some_and(|props| props.values().any(|p| present(p.get(keyword))))
    }
}
