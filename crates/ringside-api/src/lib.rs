//! Ringside REST API
//!
//! # API Structure
//!
//! ```text
//! /api/
//! ├── /health                  - Liveness
//! ├── /db-check                - Store connection and schema
//! ├── /boxers                  - Create
//! ├── /boxers/:id              - Get, delete
//! ├── /boxers/by-name/:name    - Get by name
//! ├── /boxers/:id/stats        - Record a win or a loss
//! ├── /ring                    - Enter, list, clear
//! ├── /fight                   - Resolve the fight in the ring
//! └── /leaderboard             - Ranked by total-wins or win-percentage
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::http::{HeaderName, HeaderValue, Method, Request};
use axum::Router;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware switches for the HTTP surface
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub enable_cors: bool,
    /// `*` allows any origin
    pub cors_origins: Vec<String>,
    pub enable_tracing: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            enable_tracing: true,
        }
    }
}

/// Build the `/api` router with request ids, tracing and CORS applied
pub fn create_router(state: Arc<AppState>, config: ApiConfig) -> Router {
    let mut router = Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state);

    if config.enable_tracing {
        router = router.layer(TraceLayer::new_for_http().make_span_with(request_span));
    }

    if config.enable_cors {
        router = router.layer(cors_layer(&config.cors_origins));
    }

    // Outermost, so the id exists before the trace span opens
    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    router
        .layer(PropagateRequestIdLayer::new(header.clone()))
        .layer(SetRequestIdLayer::new(header, MakeRequestUuid))
}

fn request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}
