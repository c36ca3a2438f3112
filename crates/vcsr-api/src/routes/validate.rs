//! # Data Validation Routes
//!
//! - `POST /api/validate`: validate `data` against an inline `schema`.
//! - `POST /api/validate/:schemaId`: validate `data` against a registry schema.
//!
//! A schema that does not compile is a 400 with `valid: false`. Data that
//! fails the schema is a normal 200 answer with `valid: false` and the
//! violations, so callers can tell a bad schema from bad data.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use vcsr_schema::{SchemaError, ValidationOutcome, Violation};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Build the validation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/validate", post(validate_inline))
        .route("/api/validate/:schema_id", post(validate_by_id))
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Inline schema plus the data to check against it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidateRequest {
    /// JSON Schema document. Missing or `null` is rejected.
    #[schema(value_type = Option<Object>)]
    pub schema: Option<Value>,
    /// Instance to validate. Missing or `null` is rejected.
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
}

/// Data to check against a registry schema.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidateByIdRequest {
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
}

/// One reported problem.
///
/// Request-level problems carry only `message`; violations also carry the
/// instance and schema locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorEntry {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<String>,
}

impl From<Violation> for ValidationErrorEntry {
    fn from(v: Violation) -> Self {
        Self {
            message: v.message,
            instance_path: Some(v.instance_path),
            schema_path: Some(v.schema_path),
        }
    }
}

/// Validation verdict. `errors` is omitted when the data is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationErrorEntry>>,
}

impl ValidateResponse {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: None,
        }
    }

    /// A request-level rejection with a single message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: Some(vec![ValidationErrorEntry {
                message: message.into(),
                instance_path: None,
                schema_path: None,
            }]),
        }
    }
}

impl From<ValidationOutcome> for ValidateResponse {
    fn from(outcome: ValidationOutcome) -> Self {
        if outcome.valid {
            return Self::valid();
        }
        Self {
            valid: false,
            errors: Some(outcome.errors.into_iter().map(Into::into).collect()),
        }
    }
}

pub(crate) type Verdict = (StatusCode, Json<ValidateResponse>);

pub(crate) fn bad_request(message: impl Into<String>) -> Verdict {
    (StatusCode::BAD_REQUEST, Json(ValidateResponse::rejected(message)))
}

/// Compile `schema` and, when `data` is given, evaluate it.
///
/// Compile failures become a 400 verdict rather than an [`AppError`].
pub(crate) fn check(state: &AppState, schema: &Value, data: Option<&Value>) -> Verdict {
    let compiled = match state.engine.compile(schema) {
        Ok(compiled) => compiled,
        Err(SchemaError::Compile { reason }) => {
            tracing::debug!(reason = %reason, "rejected schema");
            return bad_request(format!("Invalid schema: {reason}"));
        }
    };
    let response = match data {
        Some(data) => ValidateResponse::from(compiled.evaluate(data)),
        None => ValidateResponse::valid(),
    };
    (StatusCode::OK, Json(response))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/validate: Validate data against an inline schema.
#[utoipa::path(
    post,
    path = "/api/validate",
    request_body = ValidateRequest,
    responses(
        (status = 200, description = "Validation verdict", body = ValidateResponse),
        (status = 400, description = "Schema or data missing, or schema invalid", body = ValidateResponse),
    ),
    tag = "validation"
)]
async fn validate_inline(
    State(state): State<AppState>,
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Verdict, AppError> {
    let req = extract_json(body)?;
    let (Some(schema), Some(data)) = (req.schema, req.data) else {
        return Ok(bad_request("Schema and data are required"));
    };
    Ok(check(&state, &schema, Some(&data)))
}

/// POST /api/validate/:schemaId: Validate data against a registry schema.
#[utoipa::path(
    post,
    path = "/api/validate/{schema_id}",
    params(("schema_id" = String, Path, description = "Registry schema id (file stem)")),
    request_body = ValidateByIdRequest,
    responses(
        (status = 200, description = "Validation verdict", body = ValidateResponse),
        (status = 400, description = "Data missing or id malformed"),
        (status = 404, description = "Schema not found in registry"),
    ),
    tag = "validation"
)]
async fn validate_by_id(
    State(state): State<AppState>,
    Path(schema_id): Path<String>,
    body: Result<Json<ValidateByIdRequest>, JsonRejection>,
) -> Result<Verdict, AppError> {
    let req = extract_json(body)?;
    let Some(data) = req.data else {
        return Ok(bad_request("Data is required"));
    };
    let schema = state.registry.load(&schema_id)?;

    // A registry schema that does not compile is our fault, not the caller's.
    let compiled = state.engine.compile(&schema.document).map_err(|e| {
        AppError::Internal(format!(
            "registry schema {} does not compile: {e}",
            schema.path.display()
        ))
    })?;
    Ok((
        StatusCode::OK,
        Json(ValidateResponse::from(compiled.evaluate(&data))),
    ))
}
