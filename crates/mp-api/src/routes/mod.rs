pub mod features;
pub mod machine_pools;

use axum::Router;
use axum::middleware;
use axum::routing::{get, patch, post};

use crate::auth::auth_middleware;
use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Pools
        .route(
            "/clusters/{cluster_id}/machine_pools",
            post(machine_pools::create_pool),
        )
        .route(
            "/clusters/{cluster_id}/machine_pools/{pool_id}",
            patch(machine_pools::update_pool),
        )
        // Form helpers, kept off the pool id namespace
        .route(
            "/clusters/{cluster_id}/machine_pool_forms/validate",
            post(machine_pools::validate_pool),
        )
        .route(
            "/clusters/{cluster_id}/machine_pool_forms/preview",
            post(machine_pools::preview_pool),
        )
        .route(
            "/clusters/{cluster_id}/machine_pool_forms/label-layout",
            post(machine_pools::label_layout),
        )
        .route(
            "/clusters/{cluster_id}/machine_pool_forms/edit-values",
            post(machine_pools::edit_values),
        )
        // Feature flags
        .route("/features", get(features::get_features))
        // Auth middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}
