//! Generation options.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// How acronyms are cased in generated identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AcronymStyle {
    #[default]
    Original,
    Pascal,
    Camel,
    #[serde(alias = "lower")]
    LowerCase,
}

impl AcronymStyle {
    /// Value passed to the generator's `--acronym-style`.
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Pascal => "pascal",
            Self::Camel => "camel",
            Self::LowerCase => "lowerCase",
        }
    }
}

/// Options forwarded to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Emit type declarations only, without (de)serialization helpers.
    pub just_types: bool,
    pub acronym_style: AcronymStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            just_types: true,
            acronym_style: AcronymStyle::Original,
            package_name: None,
            namespace: None,
        }
    }
}

impl GenerationOptions {
    /// JSON-Schema-like description of the accepted options.
    pub fn describe() -> Value {
        json!({
            "justTypes": {
                "type": "boolean",
                "default": true,
                "description": "Generate type declarations only, without serialization helpers"
            },
            "acronymStyle": {
                "type": "string",
                "enum": ["original", "pascal", "camel", "lowerCase"],
                "default": "original",
                "description": "Casing applied to acronyms in generated names"
            },
            "packageName": {
                "type": "string",
                "description": "Package name for languages that use one (Go, Java, Kotlin)"
            },
            "namespace": {
                "type": "string",
                "description": "Namespace for languages that use one (C#, PHP)"
            }
        })
    }
}
