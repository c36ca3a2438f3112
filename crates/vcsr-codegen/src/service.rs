//! Source resolution, caching and generation combined behind one handle.

use std::sync::Arc;

use crate::batch::{default_batch_concurrency, generate_batch, BatchOutcome};
use crate::cache::{cache_key, GenerationCache};
use crate::error::CodegenError;
use crate::generator::{CodeGenerator, GeneratedCode};
use crate::language::Language;
use crate::options::GenerationOptions;
use crate::source::{resolve_registry, ResolvedSource, SchemaFetcher, UploadedFile};
use vcsr_schema::SchemaRegistry;

/// Generated code and whether it came from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub result: GeneratedCode,
    pub cached: bool,
}

/// Code-generation front end shared by the API and the CLI.
#[derive(Clone)]
pub struct CodegenService {
    registry: Arc<SchemaRegistry>,
    generator: Arc<dyn CodeGenerator>,
    cache: GenerationCache,
    fetcher: SchemaFetcher,
    batch_concurrency: usize,
}

impl std::fmt::Debug for CodegenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodegenService")
            .field("registry", &self.registry)
            .field("cache_entries", &self.cache.len())
            .field("batch_concurrency", &self.batch_concurrency)
            .finish_non_exhaustive()
    }
}

impl CodegenService {
    pub fn new(
        registry: Arc<SchemaRegistry>,
        generator: Arc<dyn CodeGenerator>,
        cache: GenerationCache,
        fetcher: SchemaFetcher,
    ) -> Self {
        Self {
            registry,
            generator,
            cache,
            fetcher,
            batch_concurrency: default_batch_concurrency(),
        }
    }

    /// Bound the number of uploads generated at once. 0 is treated as 1.
    pub fn with_batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency.max(1);
        self
    }

    pub fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }

    pub fn cache(&self) -> &GenerationCache {
        &self.cache
    }

    /// Generate for an already-resolved source, consulting the cache.
    ///
    /// The key covers source and language only; options are not part of it.
    pub async fn generate(
        &self,
        source: &ResolvedSource,
        language: Language,
        options: &GenerationOptions,
    ) -> Result<Generation, CodegenError> {
        let key = cache_key(&source.source_id, language);
        if let Some(result) = self.cache.get(&key) {
            tracing::debug!(key = %key, "generation cache hit");
            return Ok(Generation {
                result,
                cached: true,
            });
        }
        tracing::debug!(key = %key, "generation cache miss");

        let code = self
            .generator
            .generate(&source.input, language, options)
            .await?;
        let result = GeneratedCode::new(language, &source.input.type_name, code);
        self.cache.insert(key, result.clone());
        Ok(Generation {
            result,
            cached: false,
        })
    }

    pub async fn from_registry(
        &self,
        schema_id: &str,
        language: Language,
        options: &GenerationOptions,
    ) -> Result<Generation, CodegenError> {
        let source = resolve_registry(&self.registry, schema_id)?;
        self.generate(&source, language, options).await
    }

    pub async fn from_url(
        &self,
        url: &str,
        language: Language,
        options: &GenerationOptions,
    ) -> Result<Generation, CodegenError> {
        let source = self.fetcher.fetch(url).await?;
        self.generate(&source, language, options).await
    }

    /// Uploads are cached under their content-derived identifier, so a
    /// repeated upload is served without running the generator.
    pub async fn from_files(
        &self,
        files: &[UploadedFile],
        language: Language,
        options: &GenerationOptions,
    ) -> BatchOutcome {
        let outcome = generate_batch(files, language, self.batch_concurrency, |source| async move {
            self.generate(&source, language, options)
                .await
                .map(|generation| generation.result)
        })
        .await;
        tracing::info!(
            total = outcome.total_files,
            errors = outcome.error_count,
            concurrency = self.batch_concurrency,
            language = %language,
            "generated batch"
        );
        outcome
    }
}
