mod auth;
mod config;
mod dto;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::http::{Method, header};
use mp_core::{OcmSubmitter, PoolSubmitter};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::routes::api_router;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().expect("invalid configuration");

    // Cluster-management back end
    let submitter: Arc<dyn PoolSubmitter> =
        Arc::new(OcmSubmitter::from_env().expect("failed to build pool submitter"));
    tracing::info!(
        submitter = submitter.name(),
        capabilities = ?config.capabilities,
        "pool submitter ready"
    );

    let state = AppState {
        submitter,
        config: config.clone(),
    };

    let mut app = api_router(state).layer(TraceLayer::new_for_http());
    if let Some(origin) = config.cors_allowed_origin.clone() {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PATCH])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        );
    }

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("failed to bind listener");

    tracing::info!(addr = %config.listen_addr, "starting machine pool API");

    axum::serve(listener, app).await.expect("server error");
}
