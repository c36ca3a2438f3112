//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Domain errors from vcsr-schema and vcsr-codegen are mapped to HTTP status
//! codes here. Every error body has the same shape:
//!
//! ```json
//! {"error": {"code": "NOT_FOUND", "message": "...", "details": {...}}}
//! ```
//!
//! Messages of 500 and 502 responses are logged but never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use vcsr_codegen::{CodegenError, Language};
use vcsr_schema::RegistryError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context, present only for some client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Malformed body, missing field or invalid value (400).
    #[error("{0}")]
    BadRequest(String),

    /// The requested target language is not supported (400).
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),

    /// A remote schema origin failed or is unreachable (502).
    #[error("upstream error: {0}")]
    UpstreamError(String),

    /// The service cannot answer yet, e.g. no registry directory is readable (503).
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::UnsupportedLanguage(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_LANGUAGE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::UpstreamError(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::UnsupportedLanguage(_) => Some(json!({
                "supportedLanguages": Language::supported_ids(),
            })),
            _ => None,
        }
    }

    /// Construct a bad-request error (400).
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Construct a not-found error (404).
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::UpstreamError(_) => "An upstream service error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::UpstreamError(_) => tracing::error!(error = %self, "upstream fetch error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => tracing::debug!(error = %self, "client error"),
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CodegenError> for AppError {
    fn from(err: CodegenError) -> Self {
        match err {
            CodegenError::UnknownLanguage(lang) => Self::UnsupportedLanguage(lang),
            CodegenError::SchemaNotFound(_) => Self::NotFound(err.to_string()),
            CodegenError::InvalidSource(_) | CodegenError::UndetectableInput(_) => {
                Self::BadRequest(err.to_string())
            }
            CodegenError::Fetch { .. } => Self::UpstreamError(err.to_string()),
            CodegenError::Generator(_)
            | CodegenError::Timeout(_)
            | CodegenError::Registry(_)
            | CodegenError::Io(_)
            | CodegenError::Archive(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => {
                Self::NotFound(format!("Schema not found in registry: {id}"))
            }
            RegistryError::UnknownSource(name) => {
                Self::NotFound(format!("Schema source not found: {name}"))
            }
            RegistryError::InvalidId(_) => Self::BadRequest(err.to_string()),
            RegistryError::Io { .. } | RegistryError::Parse { .. } => {
                Self::Internal(err.to_string())
            }
        }
    }
}
