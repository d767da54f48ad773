pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::CorsConfig;
use crate::handlers::forward;
use crate::routes::health;
use crate::state::AppState;

pub use crate::config::RelayConfig;
pub use crate::error::{RelayError, RelayResult};

pub fn build_router(state: Arc<AppState>) -> Router {
    // Leave headroom so the upstream timeout surfaces as a 502 first
    let request_timeout = Duration::from_secs(state.config.upstream.timeout_secs + 5);

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/",
            post(forward::forward_completion).options(forward::preflight),
        )
        .layer(axum::middleware::from_fn(middleware::logging::log_request))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(build_cors_layer(&state.config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.origins.is_empty() || config.origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let parsed_origins: Vec<axum::http::HeaderValue> = config
            .origins
            .iter()
            .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
            .collect();

        cors.allow_origin(parsed_origins)
    }
}
