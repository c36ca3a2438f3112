//! # vcsr-api: HTTP Services for the Credential Schema Registry
//!
//! Validation of data against JSON Schemas and generation of type bindings
//! from registry schemas. Both JSON Schema evaluation and code emission are
//! delegated to engines behind narrow traits in `vcsr-schema` and
//! `vcsr-codegen`; this crate only maps HTTP onto them.
//!
//! ## API Surface
//!
//! | Prefix                 | Module                  | Domain              |
//! |------------------------|-------------------------|---------------------|
//! | `/api/schemas*`        | [`routes::schemas`]     | Schema browsing     |
//! | `/api/validate*`       | [`routes::validate`]    | Data validation     |
//! | `/api/quicktype/*`     | [`routes::codegen`]     | Code generation     |
//! | `/openapi.json`        | [`openapi`]             | API description     |
//! | `/health/*`            | this module             | Health checks       |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CatchPanic → Cors → Trace → BodyLimit → Handler
//! ```
//!
//! A panic in any handler is answered with a 500 instead of dropping the
//! connection.

pub mod config;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.frontend_url);

    let api = Router::new()
        .merge(routes::schemas::router())
        .merge(routes::validate::router())
        .merge(routes::codegen::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes));

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new()
        .merge(health)
        .merge(api)
        .fallback(unknown_endpoint)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            tracing::warn!(origin = %frontend_url, error = %e, "invalid CORS origin, cross-origin requests disabled");
            cors
        }
    }
}

async fn unknown_endpoint() -> AppError {
    AppError::not_found("Endpoint not found")
}

/// Liveness: the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness: at least one registry directory can be read.
///
/// Returns 200 "ready", or a 503 error naming the problem.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    if state.registry.readable_roots() == 0 {
        tracing::debug!(dirs = ?state.registry.roots(), "readiness check failed");
        return Err(AppError::ServiceUnavailable(
            "no schema directory readable".to_string(),
        ));
    }
    Ok("ready")
}
