//! # Error Types
//!
//! Errors raised while parsing text into a schema document.

use thiserror::Error;

/// A schema document could not be parsed.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The text is not valid JSON.
    #[error("invalid JSON at line {line}, column {column}: {reason}")]
    InvalidJson {
        /// 1-based line of the parse failure.
        line: usize,
        /// 1-based column of the parse failure.
        column: usize,
        /// Parser message.
        reason: String,
    },
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson {
            line: err.line(),
            column: err.column(),
            reason: err.to_string(),
        }
    }
}
