//! Supported target languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodegenError;

/// A language the generator can emit.
///
/// Serialized as its lowercase id (`"typescript"`, `"csharp"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    Python,
    Go,
    CSharp,
    Java,
    Rust,
    Swift,
    Kotlin,
    Php,
    Ruby,
    JavaScript,
}

impl Language {
    /// Every supported language, in listing order.
    pub fn all() -> &'static [Language] {
        &[
            Self::TypeScript,
            Self::Python,
            Self::Go,
            Self::CSharp,
            Self::Java,
            Self::Rust,
            Self::Swift,
            Self::Kotlin,
            Self::Php,
            Self::Ruby,
            Self::JavaScript,
        ]
    }

    /// Identifier used on the wire and by the generator's `--lang` flag.
    pub fn id(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Go => "go",
            Self::CSharp => "csharp",
            Self::Java => "java",
            Self::Rust => "rust",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::Php => "php",
            Self::Ruby => "ruby",
            Self::JavaScript => "javascript",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
            Self::Go => "Go",
            Self::CSharp => "C#",
            Self::Java => "Java",
            Self::Rust => "Rust",
            Self::Swift => "Swift",
            Self::Kotlin => "Kotlin",
            Self::Php => "PHP",
            Self::Ruby => "Ruby",
            Self::JavaScript => "JavaScript",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript interfaces and type aliases",
            Self::Python => "Python dataclasses with type hints",
            Self::Go => "Go structs with JSON tags",
            Self::CSharp => "C# classes with Newtonsoft.Json attributes",
            Self::Java => "Java classes with Jackson annotations",
            Self::Rust => "Rust structs with Serde derives",
            Self::Swift => "Swift structs conforming to Codable",
            Self::Kotlin => "Kotlin data classes",
            Self::Php => "PHP classes",
            Self::Ruby => "Ruby classes with dry-types",
            Self::JavaScript => "JavaScript with runtime type checks",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::Python => "py",
            Self::Go => "go",
            Self::CSharp => "cs",
            Self::Java => "java",
            Self::Rust => "rs",
            Self::Swift => "swift",
            Self::Kotlin => "kt",
            Self::Php => "php",
            Self::Ruby => "rb",
            Self::JavaScript => "js",
        }
    }

    /// Ids of every supported language.
    pub fn supported_ids() -> Vec<&'static str> {
        Self::all().iter().map(Language::id).collect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Language {
    type Err = CodegenError;

    /// Case-insensitive lookup by id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|lang| lang.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CodegenError::UnknownLanguage(s.to_string()))
    }
}
