pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod submission;
pub mod upstream;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};
use crate::submission::SubmissionLog;
use crate::upstream::{UpstreamClient, UpstreamError};

pub fn build_app(config: Config) -> Result<(Router, SharedState), UpstreamError> {
    let upstream = UpstreamClient::new(&config)?;
    tracing::info!("Relaying submissions to {}", upstream.url());

    let max_body_size = config.max_body_size;
    let state: SharedState = Arc::new(AppState {
        config,
        upstream,
        log: SubmissionLog::new(),
    });

    let app = Router::new()
        .merge(routes::relay_routes())
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Ok((app, state))
}

async fn health() -> &'static str {
    "ok"
}
