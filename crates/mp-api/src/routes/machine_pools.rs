use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use mp_core::{
    FieldValidator, FormValues, LabelSectionView, RequestPayload, Topology, ValidationReport,
};

use crate::dto::{
    EditValuesRequest, LabelLayoutRequest, LabelLayoutResponse, PoolFormRequest, PreviewQuery,
};
use crate::error::ApiError;
use crate::state::AppState;

/// Validate the form, then build the payload for the given mode.
fn checked_payload(
    state: &AppState,
    req: &PoolFormRequest,
    is_editing: bool,
) -> Result<RequestPayload, ApiError> {
    let report = FieldValidator::new().validate(&req.values);
    if !report.is_valid() {
        return Err(ApiError::Invalid(report));
    }

    let ctx = req.context(is_editing, &state.config.capabilities);
    Ok(RequestPayload::build(req.topology, &req.values, &ctx))
}

/// POST /clusters/{cluster_id}/machine_pool_forms/validate
pub async fn validate_pool(
    Path(cluster_id): Path<String>,
    Json(req): Json<PoolFormRequest>,
) -> Json<ValidationReport> {
    let report = FieldValidator::new().validate(&req.values);
    tracing::debug!(%cluster_id, valid = report.is_valid(), "validated pool form");
    Json(report)
}

/// POST /clusters/{cluster_id}/machine_pool_forms/preview
///
/// The payload that would be submitted, without submitting it.
pub async fn preview_pool(
    State(state): State<AppState>,
    Path(_cluster_id): Path<String>,
    Query(query): Query<PreviewQuery>,
    Json(req): Json<PoolFormRequest>,
) -> Result<Json<RequestPayload>, ApiError> {
    checked_payload(&state, &req, query.edit).map(Json)
}

/// POST /clusters/{cluster_id}/machine_pools
pub async fn create_pool(
    State(state): State<AppState>,
    Path(cluster_id): Path<String>,
    Json(req): Json<PoolFormRequest>,
) -> Result<(StatusCode, Json<RequestPayload>), ApiError> {
    let payload = checked_payload(&state, &req, false)?;

    let created = match state.submitter.create_pool(&cluster_id, &payload).await {
        Ok(created) => created,
        Err(e) => {
            tracing::error!(error = %e, %cluster_id, pool_id = %payload.id(), "failed to create pool");
            return Err(ApiError::Upstream(e));
        }
    };

    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /clusters/{cluster_id}/machine_pools/{pool_id}
pub async fn update_pool(
    State(state): State<AppState>,
    Path((cluster_id, pool_id)): Path<(String, String)>,
    Json(req): Json<PoolFormRequest>,
) -> Result<Json<RequestPayload>, ApiError> {
    if req.values.name != pool_id {
        return Err(ApiError::BadRequest(format!(
            "pool name {:?} does not match {pool_id:?}",
            req.values.name
        )));
    }

    let payload = checked_payload(&state, &req, true)?;

    let updated = state
        .submitter
        .update_pool(&cluster_id, &pool_id, &payload)
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, %cluster_id, %pool_id, "failed to update pool");
        })?;

    Ok(Json(updated))
}

/// POST /clusters/{cluster_id}/machine_pool_forms/label-layout
pub async fn label_layout(
    State(state): State<AppState>,
    Path(_cluster_id): Path<String>,
    Json(req): Json<LabelLayoutRequest>,
) -> Json<LabelLayoutResponse> {
    let view = LabelSectionView::new(
        state.config.capabilities,
        req.topology == Topology::Hosted,
        req.is_new_pool,
    );
    Json(LabelLayoutResponse::new(view, &req.labels))
}

/// POST /clusters/{cluster_id}/machine_pool_forms/edit-values
///
/// Form rows for a stored pool, ready to be edited and sent back through
/// `update_pool`.
pub async fn edit_values(
    Path(cluster_id): Path<String>,
    Json(req): Json<EditValuesRequest>,
) -> Result<Json<FormValues>, ApiError> {
    let topology = req.topology;
    let values = req
        .form_values()
        .map_err(|e| ApiError::BadRequest(format!("pool is not a valid {topology} pool: {e}")))?;

    tracing::debug!(%cluster_id, pool_id = %values.name, %topology, "opened pool for editing");
    Ok(Json(values))
}
