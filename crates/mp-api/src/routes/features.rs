use axum::Json;
use axum::extract::State;
use mp_core::TagCapabilities;

use crate::state::AppState;

/// GET /features
pub async fn get_features(State(state): State<AppState>) -> Json<TagCapabilities> {
    Json(state.config.capabilities)
}
