//! # Schema Browsing Routes
//!
//! - `GET /api/schemas`: summaries of every schema along the search path.
//! - `GET /api/schemas/:source`: summaries of one source directory.
//! - `GET /api/schemas/:source/:schemaId`: the raw schema document.
//!
//! A source is a registry directory, named by its final path component.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use vcsr_schema::{RegistrySchema, SchemaSummary};

use crate::error::AppError;
use crate::state::AppState;

/// Build the schema browsing router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/schemas", get(list_schemas))
        .route("/api/schemas/:source", get(list_source))
        .route("/api/schemas/:source/:schema_id", get(get_schema))
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Catalog entry for one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SchemaSummaryResponse {
    pub id: String,
    pub source: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// One of identity, business, content, trust, payments, platform.
    pub category: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub filename: String,
}

impl From<SchemaSummary> for SchemaSummaryResponse {
    fn from(s: SchemaSummary) -> Self {
        let category = serde_json::to_value(s.category)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        Self {
            id: s.id,
            source: s.source,
            title: s.title,
            description: s.description,
            category,
            tags: s.tags,
            version: s.version,
            filename: s.filename,
        }
    }
}

/// A list of schema summaries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchemaListResponse {
    pub success: bool,
    pub total: usize,
    /// Source names in search order. Present on the full listing only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    pub schemas: Vec<SchemaSummaryResponse>,
}

fn summaries(schemas: &[RegistrySchema]) -> Vec<SchemaSummaryResponse> {
    schemas
        .iter()
        .map(SchemaSummary::from_registry)
        .map(Into::into)
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/schemas: Summaries of every registry schema.
#[utoipa::path(
    get,
    path = "/api/schemas",
    responses(
        (status = 200, description = "All schemas, first directory wins per id", body = SchemaListResponse),
    ),
    tag = "schemas"
)]
async fn list_schemas(State(state): State<AppState>) -> Json<SchemaListResponse> {
    let schemas = summaries(&state.registry.load_all());
    let sources = state.registry.sources().into_iter().map(|s| s.name).collect();
    Json(SchemaListResponse {
        success: true,
        total: schemas.len(),
        sources: Some(sources),
        schemas,
    })
}

/// GET /api/schemas/:source: Summaries of one source directory.
#[utoipa::path(
    get,
    path = "/api/schemas/{source}",
    params(("source" = String, Path, description = "Source directory name")),
    responses(
        (status = 200, description = "Schemas in this source", body = SchemaListResponse),
        (status = 404, description = "Schema source not found", body = crate::error::ErrorBody),
    ),
    tag = "schemas"
)]
async fn list_source(
    State(state): State<AppState>,
    Path(source): Path<String>,
) -> Result<Json<SchemaListResponse>, AppError> {
    let schemas = summaries(&state.registry.load_source(&source)?);
    Ok(Json(SchemaListResponse {
        success: true,
        total: schemas.len(),
        sources: None,
        schemas,
    }))
}

/// GET /api/schemas/:source/:schemaId: The raw schema document.
#[utoipa::path(
    get,
    path = "/api/schemas/{source}/{schema_id}",
    params(
        ("source" = String, Path, description = "Source directory name"),
        ("schema_id" = String, Path, description = "Registry schema id (file stem)"),
    ),
    responses(
        (status = 200, description = "Schema document", body = serde_json::Value),
        (status = 400, description = "Id malformed", body = crate::error::ErrorBody),
        (status = 404, description = "Source or schema not found", body = crate::error::ErrorBody),
    ),
    tag = "schemas"
)]
async fn get_schema(
    State(state): State<AppState>,
    Path((source, schema_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let schema = state.registry.load_from(&source, &schema_id)?;
    Ok(Json(schema.document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcsr_schema::SchemaCategory;

    #[test]
    fn summary_response_uses_category_name() {
        let response = SchemaSummaryResponse::from(SchemaSummary {
            id: "Invoice".into(),
            source: "v1".into(),
            title: "Invoice".into(),
            description: None,
            category: SchemaCategory::Payments,
            tags: vec![],
            version: None,
            filename: "Invoice.schema.json".into(),
        });
        assert_eq!(response.category, "payments");
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("description").is_none());
        assert!(value.get("version").is_none());
    }
}
