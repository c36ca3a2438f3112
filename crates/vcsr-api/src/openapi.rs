//! # OpenAPI Specification Assembly
//!
//! Collects every utoipa-documented route into one OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VCSR API",
        version = "0.1.0",
        description = "Verifiable-credential schema registry services.\n\nProvides:\n- **Browsing** of registry schemas by source\n- **Validation** of data against inline JSON Schemas or registry schemas\n- **Code generation** of type bindings in eleven languages from registry ids, URLs or uploaded files\n- **Generation cache** inspection and editing\n- **Zip packaging** of generated files\n\nHealth checks live under `/health/*`.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server"),
    ),
    paths(
        // Schema browsing
        crate::routes::schemas::list_schemas,
        crate::routes::schemas::list_source,
        crate::routes::schemas::get_schema,
        // Validation
        crate::routes::validate::validate_inline,
        crate::routes::validate::validate_by_id,
        // Code generation
        crate::routes::codegen::list_languages,
        crate::routes::codegen::get_options,
        crate::routes::codegen::generate_from_registry,
        crate::routes::codegen::generate_from_url,
        crate::routes::codegen::generate_from_files,
        crate::routes::codegen::get_cached,
        crate::routes::codegen::put_cached,
        crate::routes::codegen::delete_cached,
        crate::routes::codegen::download_zip,
        crate::routes::codegen::validate_schema,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            crate::routes::schemas::SchemaSummaryResponse,
            crate::routes::schemas::SchemaListResponse,
            crate::routes::validate::ValidateRequest,
            crate::routes::validate::ValidateByIdRequest,
            crate::routes::validate::ValidateResponse,
            crate::routes::validate::ValidationErrorEntry,
            crate::routes::codegen::GenerateFromRegistryRequest,
            crate::routes::codegen::GenerateFromUrlRequest,
            crate::routes::codegen::GenerateFromFilesRequest,
            crate::routes::codegen::DownloadZipRequest,
            crate::routes::codegen::ValidateSchemaRequest,
            crate::routes::codegen::LanguageInfo,
            crate::routes::codegen::LanguagesResponse,
            crate::routes::codegen::OptionsResponse,
            crate::routes::codegen::GenerateResponse,
            crate::routes::codegen::BatchResponse,
            crate::routes::codegen::CacheEntryResponse,
            crate::routes::codegen::CacheWriteResponse,
            crate::routes::codegen::CacheDeleteResponse,
        )
    ),
    tags(
        (name = "schemas", description = "Browse registry schemas by source"),
        (name = "validation", description = "Validate data against inline or registry JSON Schemas"),
        (name = "codegen", description = "Generate type bindings from registry schemas, URLs or uploads"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_generates_with_info() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "VCSR API");
        assert_eq!(spec.info.version, "0.1.0");
    }

    #[test]
    fn spec_has_validation_paths() {
        let spec = ApiDoc::openapi();
        assert!(spec.paths.paths.contains_key("/api/validate"));
        assert!(spec.paths.paths.contains_key("/api/validate/{schema_id}"));
    }

    #[test]
    fn spec_has_schema_paths() {
        let spec = ApiDoc::openapi();
        for path in [
            "/api/schemas",
            "/api/schemas/{source}",
            "/api/schemas/{source}/{schema_id}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn spec_has_codegen_paths() {
        let spec = ApiDoc::openapi();
        for path in [
            "/api/quicktype/languages",
            "/api/quicktype/options",
            "/api/quicktype/generate-from-registry",
            "/api/quicktype/generate-from-url",
            "/api/quicktype/generate-from-files",
            "/api/quicktype/cache/{key}",
            "/api/quicktype/download-zip",
            "/api/quicktype/validate-schema",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn spec_has_tags() {
        let spec = ApiDoc::openapi();
        let tags: Vec<String> = spec
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert!(tags.contains(&"validation".to_string()));
        assert!(tags.contains(&"codegen".to_string()));
        assert!(tags.contains(&"schemas".to_string()));
    }
}
