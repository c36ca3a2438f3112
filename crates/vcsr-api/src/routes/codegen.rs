//! # Code-Generation Routes
//!
//! Type bindings for registry schemas in eleven languages.
//!
//! - `GET /api/quicktype/languages`: supported target languages.
//! - `GET /api/quicktype/options`: accepted generation options.
//! - `POST /api/quicktype/generate-from-registry`: generate from a registry id.
//! - `POST /api/quicktype/generate-from-url`: generate from a fetched schema.
//! - `POST /api/quicktype/generate-from-files`: batch over uploaded files.
//! - `GET|PUT|DELETE /api/quicktype/cache/:key`: inspect or edit the cache.
//! - `POST /api/quicktype/download-zip`: package results as a zip.
//! - `POST /api/quicktype/validate-schema`: compile a schema, optionally
//!   validate data against it.
//!
//! Every generation goes through the cache. Uploads are keyed by a digest
//! of the resolved input and run a bounded number at a time. A per-file
//! failure in a batch becomes an inline error stub, so the batch route
//! answers 200 whenever the request itself is well formed.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use vcsr_codegen::{
    archive_file_name, build_archive, GeneratedCode, Generation, GenerationOptions, Language,
    UploadedFile,
};

use crate::error::AppError;
use crate::extractors::{extract_json, required};
use crate::routes::validate::{bad_request, check, ValidateResponse, Verdict};
use crate::state::AppState;

/// Build the code-generation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/quicktype/languages", get(list_languages))
        .route("/api/quicktype/options", get(get_options))
        .route(
            "/api/quicktype/generate-from-registry",
            post(generate_from_registry),
        )
        .route("/api/quicktype/generate-from-url", post(generate_from_url))
        .route("/api/quicktype/generate-from-files", post(generate_from_files))
        .route(
            "/api/quicktype/cache/:key",
            get(get_cached).put(put_cached).delete(delete_cached),
        )
        .route("/api/quicktype/download-zip", post(download_zip))
        .route("/api/quicktype/validate-schema", post(validate_schema))
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Generate from a schema in the registry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromRegistryRequest {
    /// Registry id, e.g. `PersonCredential`.
    pub schema_id: Option<String>,
    /// Language id, e.g. `typescript`. Case-insensitive.
    pub target_language: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub options: Option<GenerationOptions>,
}

/// Generate from a schema served over HTTP(S).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromUrlRequest {
    pub url: Option<String>,
    pub target_language: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub options: Option<GenerationOptions>,
}

/// Generate from uploaded files.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromFilesRequest {
    /// `{name, content, type}` entries. `type` is one of `json-schema`,
    /// `json`, `typescript` or `unknown` (auto-detect).
    #[schema(value_type = Option<Vec<Object>>)]
    pub files: Option<Vec<UploadedFile>>,
    pub target_language: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub options: Option<GenerationOptions>,
}

/// Results to package.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DownloadZipRequest {
    #[schema(value_type = Option<Vec<Object>>)]
    pub results: Option<Vec<GeneratedCode>>,
}

/// Schema to compile, with optional data to validate.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidateSchemaRequest {
    #[schema(value_type = Option<Object>)]
    pub schema: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One supported target language.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LanguageInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub extension: String,
}

impl From<Language> for LanguageInfo {
    fn from(lang: Language) -> Self {
        Self {
            id: lang.id().to_string(),
            name: lang.display_name().to_string(),
            description: lang.description().to_string(),
            extension: lang.extension().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LanguagesResponse {
    pub success: bool,
    pub languages: Vec<LanguageInfo>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OptionsResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub options: Value,
}

/// A single generation result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    pub success: bool,
    /// Whether the result was served from the cache.
    pub cached: bool,
    /// `{language, code, filename}`.
    #[schema(value_type = Object)]
    pub result: GeneratedCode,
}

impl From<Generation> for GenerateResponse {
    fn from(generation: Generation) -> Self {
        Self {
            success: true,
            cached: generation.cached,
            result: generation.result,
        }
    }
}

/// Batch results in upload order. Failed files appear as error stubs.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub success: bool,
    #[schema(value_type = Vec<Object>)]
    pub results: Vec<GeneratedCode>,
    pub total_files: usize,
    pub success_count: usize,
    pub error_count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CacheEntryResponse {
    pub success: bool,
    pub key: String,
    #[schema(value_type = Object)]
    pub result: GeneratedCode,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CacheWriteResponse {
    pub success: bool,
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CacheDeleteResponse {
    pub success: bool,
    pub key: String,
    /// Whether an entry existed.
    pub removed: bool,
}

fn target_language(raw: Option<String>) -> Result<Language, AppError> {
    Ok(required(raw, "targetLanguage")?.parse::<Language>()?)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/quicktype/languages: List supported target languages.
#[utoipa::path(
    get,
    path = "/api/quicktype/languages",
    responses((status = 200, description = "Supported languages", body = LanguagesResponse)),
    tag = "codegen"
)]
async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        success: true,
        languages: Language::all().iter().copied().map(LanguageInfo::from).collect(),
    })
}

/// GET /api/quicktype/options: Describe accepted generation options.
#[utoipa::path(
    get,
    path = "/api/quicktype/options",
    responses((status = 200, description = "Option descriptions", body = OptionsResponse)),
    tag = "codegen"
)]
async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        success: true,
        options: GenerationOptions::describe(),
    })
}

/// POST /api/quicktype/generate-from-registry: Generate from a registry id.
#[utoipa::path(
    post,
    path = "/api/quicktype/generate-from-registry",
    request_body = GenerateFromRegistryRequest,
    responses(
        (status = 200, description = "Generated code", body = GenerateResponse),
        (status = 400, description = "Missing field or unsupported language", body = crate::error::ErrorBody),
        (status = 404, description = "Schema not found in registry", body = crate::error::ErrorBody),
    ),
    tag = "codegen"
)]
async fn generate_from_registry(
    State(state): State<AppState>,
    body: Result<Json<GenerateFromRegistryRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let req = extract_json(body)?;
    let schema_id = required(req.schema_id, "schemaId")?;
    let language = target_language(req.target_language)?;
    let options = req.options.unwrap_or_default();

    let generation = state
        .codegen
        .from_registry(&schema_id, language, &options)
        .await?;
    tracing::info!(schema_id = %schema_id, language = %language, cached = generation.cached, "generated from registry");
    Ok(Json(generation.into()))
}

/// POST /api/quicktype/generate-from-url: Generate from a remote schema.
#[utoipa::path(
    post,
    path = "/api/quicktype/generate-from-url",
    request_body = GenerateFromUrlRequest,
    responses(
        (status = 200, description = "Generated code", body = GenerateResponse),
        (status = 400, description = "Missing field, bad URL, non-JSON body or unsupported language", body = crate::error::ErrorBody),
        (status = 502, description = "Schema origin failed", body = crate::error::ErrorBody),
    ),
    tag = "codegen"
)]
async fn generate_from_url(
    State(state): State<AppState>,
    body: Result<Json<GenerateFromUrlRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let req = extract_json(body)?;
    let url = required(req.url, "url")?;
    let language = target_language(req.target_language)?;
    let options = req.options.unwrap_or_default();

    let generation = state.codegen.from_url(&url, language, &options).await?;
    tracing::info!(url = %url, language = %language, cached = generation.cached, "generated from url");
    Ok(Json(generation.into()))
}

/// POST /api/quicktype/generate-from-files: Generate for each uploaded file.
#[utoipa::path(
    post,
    path = "/api/quicktype/generate-from-files",
    request_body = GenerateFromFilesRequest,
    responses(
        (status = 200, description = "Per-file results, failures inline", body = BatchResponse),
        (status = 400, description = "No files, missing or unsupported language", body = crate::error::ErrorBody),
    ),
    tag = "codegen"
)]
async fn generate_from_files(
    State(state): State<AppState>,
    body: Result<Json<GenerateFromFilesRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    let req = extract_json(body)?;
    let files = req
        .files
        .filter(|files| !files.is_empty())
        .ok_or_else(|| AppError::bad_request("No files provided"))?;
    let language = target_language(req.target_language)?;
    let options = req.options.unwrap_or_default();

    let outcome = state.codegen.from_files(&files, language, &options).await;
    Ok(Json(BatchResponse {
        success: true,
        results: outcome.results,
        total_files: outcome.total_files,
        success_count: outcome.success_count,
        error_count: outcome.error_count,
    }))
}

/// GET /api/quicktype/cache/:key: Read a cached result.
#[utoipa::path(
    get,
    path = "/api/quicktype/cache/{key}",
    params(("key" = String, Path, description = "Cache key, `<source>-<language>`")),
    responses(
        (status = 200, description = "Cached result", body = CacheEntryResponse),
        (status = 404, description = "No live entry for this key", body = crate::error::ErrorBody),
    ),
    tag = "codegen"
)]
async fn get_cached(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheEntryResponse>, AppError> {
    let result = state
        .codegen
        .cache()
        .get(&key)
        .ok_or_else(|| AppError::not_found(format!("No cached result for key: {key}")))?;
    Ok(Json(CacheEntryResponse {
        success: true,
        key,
        result,
    }))
}

/// PUT /api/quicktype/cache/:key: Store a result under a key.
///
/// The body is a generation result, `{language, code, filename}`.
#[utoipa::path(
    put,
    path = "/api/quicktype/cache/{key}",
    params(("key" = String, Path, description = "Cache key")),
    request_body = Object,
    responses(
        (status = 200, description = "Stored", body = CacheWriteResponse),
        (status = 400, description = "Body is not a generation result", body = crate::error::ErrorBody),
    ),
    tag = "codegen"
)]
async fn put_cached(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<GeneratedCode>, JsonRejection>,
) -> Result<Json<CacheWriteResponse>, AppError> {
    let result = extract_json(body)?;
    state.codegen.cache().insert(key.clone(), result);
    Ok(Json(CacheWriteResponse { success: true, key }))
}

/// DELETE /api/quicktype/cache/:key: Drop a cached result.
#[utoipa::path(
    delete,
    path = "/api/quicktype/cache/{key}",
    params(("key" = String, Path, description = "Cache key")),
    responses((status = 200, description = "Removal outcome", body = CacheDeleteResponse)),
    tag = "codegen"
)]
async fn delete_cached(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<CacheDeleteResponse> {
    let removed = state.codegen.cache().remove(&key);
    Json(CacheDeleteResponse {
        success: true,
        key,
        removed,
    })
}

/// POST /api/quicktype/download-zip: Package results as a zip archive.
#[utoipa::path(
    post,
    path = "/api/quicktype/download-zip",
    request_body = DownloadZipRequest,
    responses(
        (status = 200, description = "Zip archive", content_type = "application/zip"),
        (status = 400, description = "No results to download", body = crate::error::ErrorBody),
    ),
    tag = "codegen"
)]
async fn download_zip(
    body: Result<Json<DownloadZipRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let req = extract_json(body)?;
    let results = req
        .results
        .filter(|results| !results.is_empty())
        .ok_or_else(|| AppError::bad_request("No results to download"))?;

    let now = chrono::Utc::now();
    let bytes = build_archive(&results, now)?;
    let disposition = format!("attachment; filename=\"{}\"", archive_file_name(now));
    tracing::info!(files = results.len(), bytes = bytes.len(), "built zip download");

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/quicktype/validate-schema: Compile a schema, optionally check data.
#[utoipa::path(
    post,
    path = "/api/quicktype/validate-schema",
    request_body = ValidateSchemaRequest,
    responses(
        (status = 200, description = "Schema compiles; verdict for data if given", body = ValidateResponse),
        (status = 400, description = "Schema missing or invalid", body = ValidateResponse),
    ),
    tag = "codegen"
)]
async fn validate_schema(
    State(state): State<AppState>,
    body: Result<Json<ValidateSchemaRequest>, JsonRejection>,
) -> Result<Verdict, AppError> {
    let req = extract_json(body)?;
    let Some(schema) = req.schema else {
        return Ok(bad_request("Schema is required"));
    };
    Ok(check(&state, &schema, req.data.as_ref()))
}
