//! Code-generation error types.

use std::time::Duration;

use thiserror::Error;
use vcsr_schema::RegistryError;

/// Errors from resolving a schema source or running the generator.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The target language is not in the supported list.
    #[error("unsupported target language '{0}'")]
    UnknownLanguage(String),

    /// No schema with this id exists in any registry directory.
    #[error("Schema not found in registry: {0}")]
    SchemaNotFound(String),

    /// The request named a source that cannot be used (bad id, bad URL
    /// scheme, body that is not JSON, empty upload).
    #[error("invalid schema source: {0}")]
    InvalidSource(String),

    /// The schema URL could not be fetched or answered with a non-2xx status.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Upload content is neither JSON nor a TypeScript interface.
    #[error("could not detect the input format of '{0}'")]
    UndetectableInput(String),

    /// The generator exited unsuccessfully or could not be started.
    #[error("code generator failed: {0}")]
    Generator(String),

    /// The generator did not finish within the configured bound.
    #[error("code generator timed out after {0:?}")]
    Timeout(Duration),

    /// Registry file could not be read or parsed.
    #[error(transparent)]
    Registry(RegistryError),

    /// Scratch-file or archive I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip packaging failed.
    #[error("archive error: {0}")]
    Archive(String),
}

impl From<RegistryError> for CodegenError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => Self::SchemaNotFound(id),
            RegistryError::InvalidId(id) => Self::InvalidSource(format!("invalid schema id '{id}'")),
            other => Self::Registry(other),
        }
    }
}

impl From<zip::result::ZipError> for CodegenError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}
