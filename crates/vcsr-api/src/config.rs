//! Service configuration.
//!
//! Every setting has a default; the environment overrides it. Parsing goes
//! through [`AppConfig::from_lookup`] so tests can supply variables without
//! touching the process environment.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the API process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen port. `VCSR_PORT`, default 3001.
    pub port: u16,
    /// Registry directories, searched in order. `VCSR_SCHEMA_DIRS`.
    pub schema_dirs: Vec<PathBuf>,
    /// Mirror consulted when an id is in none of `schema_dirs`.
    pub schema_fallback_dir: Option<PathBuf>,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    /// Executable used for code generation.
    pub quicktype_bin: PathBuf,
    pub codegen_timeout: Duration,
    /// Uploads generated at once in a batch.
    pub codegen_concurrency: usize,
    pub fetch_timeout: Duration,
    /// Origin allowed by CORS.
    pub frontend_url: String,
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            schema_dirs: vec![PathBuf::from("schemas/v1"), PathBuf::from("drafts")],
            schema_fallback_dir: Some(PathBuf::from("docs-site/public/schemas/v1")),
            cache_ttl: Duration::from_secs(3600),
            cache_capacity: 256,
            quicktype_bin: PathBuf::from("quicktype"),
            codegen_timeout: Duration::from_secs(60),
            codegen_concurrency: vcsr_codegen::default_batch_concurrency(),
            fetch_timeout: Duration::from_secs(30),
            frontend_url: "http://localhost:3000".to_string(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VCSR_PORT` (default: 3001)
    /// - `VCSR_SCHEMA_DIRS` (default: `schemas/v1,drafts`)
    /// - `VCSR_SCHEMA_FALLBACK_DIR` (default: `docs-site/public/schemas/v1`, empty disables)
    /// - `VCSR_CACHE_TTL_SECS` (default: 3600)
    /// - `VCSR_CACHE_CAPACITY` (default: 256)
    /// - `VCSR_QUICKTYPE_BIN` (default: `quicktype`)
    /// - `VCSR_CODEGEN_TIMEOUT_SECS` (default: 60)
    /// - `VCSR_CODEGEN_CONCURRENCY` (default: number of CPUs)
    /// - `VCSR_FETCH_TIMEOUT_SECS` (default: 30)
    /// - `VCSR_FRONTEND_URL` (default: `http://localhost:3000`)
    /// - `VCSR_MAX_BODY_BYTES` (default: 10485760)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let text = |var: &str| lookup(var).map(|v| v.trim().to_string());

        let schema_dirs = match text("VCSR_SCHEMA_DIRS") {
            Some(raw) => {
                let dirs: Vec<PathBuf> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(PathBuf::from)
                    .collect();
                if dirs.is_empty() {
                    return Err(ConfigError::Empty("VCSR_SCHEMA_DIRS".to_string()));
                }
                dirs
            }
            None => defaults.schema_dirs,
        };

        let schema_fallback_dir = match text("VCSR_SCHEMA_FALLBACK_DIR") {
            Some(dir) if dir.is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => defaults.schema_fallback_dir,
        };

        Ok(Self {
            port: number(&lookup, "VCSR_PORT", defaults.port)?,
            schema_dirs,
            schema_fallback_dir,
            cache_ttl: secs(&lookup, "VCSR_CACHE_TTL_SECS", defaults.cache_ttl)?,
            cache_capacity: number(&lookup, "VCSR_CACHE_CAPACITY", defaults.cache_capacity)?,
            quicktype_bin: text("VCSR_QUICKTYPE_BIN")
                .filter(|b| !b.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.quicktype_bin),
            codegen_timeout: secs(&lookup, "VCSR_CODEGEN_TIMEOUT_SECS", defaults.codegen_timeout)?,
            codegen_concurrency: number(
                &lookup,
                "VCSR_CODEGEN_CONCURRENCY",
                defaults.codegen_concurrency,
            )?,
            fetch_timeout: secs(&lookup, "VCSR_FETCH_TIMEOUT_SECS", defaults.fetch_timeout)?,
            frontend_url: text("VCSR_FRONTEND_URL")
                .filter(|u| !u.is_empty())
                .unwrap_or(defaults.frontend_url),
            max_body_bytes: number(&lookup, "VCSR_MAX_BODY_BYTES", defaults.max_body_bytes)?,
        })
    }
}

fn number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            var: var.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

fn secs(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    number(lookup, var, default.as_secs()).map(Duration::from_secs)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: String, value: String },
    #[error("{0} must not be empty")]
    Empty(String),
}
