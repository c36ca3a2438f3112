//! # Application State
//!
//! Shared state handed to every handler: configuration, the schema
//! registry, the validation engine and the code-generation service.
//!
//! All members are cheap to clone. The only mutable state is the
//! generation cache inside [`CodegenService`], which takes its own lock and
//! never holds it across an `.await`.

use std::sync::Arc;

use vcsr_codegen::{
    CodeGenerator, CodegenError, CodegenService, GenerationCache, QuicktypeCli, SchemaFetcher,
};
use vcsr_schema::{JsonSchemaEngine, SchemaRegistry, ValidationEngine};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub registry: Arc<SchemaRegistry>,
    pub engine: Arc<dyn ValidationEngine>,
    pub codegen: CodegenService,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("codegen", &self.codegen)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build state for production: quicktype on `PATH` (or the configured
    /// binary) as the generator.
    pub fn from_config(config: AppConfig) -> Result<Self, CodegenError> {
        let generator = QuicktypeCli::new(config.quicktype_bin.clone(), config.codegen_timeout);
        Self::with_generator(config, Arc::new(generator))
    }

    /// Build state around an injected generator.
    pub fn with_generator(
        config: AppConfig,
        generator: Arc<dyn CodeGenerator>,
    ) -> Result<Self, CodegenError> {
        let mut registry = SchemaRegistry::new(config.schema_dirs.clone());
        if let Some(fallback) = &config.schema_fallback_dir {
            registry = registry.with_fallback(fallback.clone());
        }
        let registry = Arc::new(registry);

        let engine = JsonSchemaEngine::with_registry(&registry);
        let cache = GenerationCache::new(config.cache_capacity, config.cache_ttl);
        let fetcher = SchemaFetcher::new(config.fetch_timeout)?;
        let codegen = CodegenService::new(registry.clone(), generator, cache, fetcher)
            .with_batch_concurrency(config.codegen_concurrency);

        tracing::info!(
            dirs = ?config.schema_dirs,
            readable = registry.readable_roots(),
            references = engine.known_references(),
            "schema registry configured"
        );

        Ok(Self {
            config: Arc::new(config),
            registry,
            engine: Arc::new(engine),
            codegen,
        })
    }
}
