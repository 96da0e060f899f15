use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use shared::{
    ApiAck, ApiErrorBody, DefaultLayout, SaveSelectionsRequest, SetDefaultsRequest, TeethCatalog,
};

use crate::catalog;
use crate::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiErrorBody>)>;

fn internal_error(message: &str) -> (StatusCode, Json<ApiErrorBody>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiErrorBody::new(message)))
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Tooth number → crown/root artwork paths
pub async fn list_teeth(State(state): State<AppState>) -> ApiResult<TeethCatalog> {
    let dir = state.dental_dir.clone();
    let catalog = tokio::task::spawn_blocking(move || catalog::scan_catalog(&dir))
        .await
        .map_err(|_| internal_error("Failed to load teeth data"))?
        .map_err(|e| {
            tracing::error!("Error loading teeth data: {}", e);
            internal_error("Failed to load teeth data")
        })?;
    Ok(Json(catalog))
}

/// Current default layout
pub async fn get_defaults(State(state): State<AppState>) -> ApiResult<DefaultLayout> {
    let layout = state.defaults.load_async().await.map_err(|e| {
        tracing::error!("Error loading defaults: {}", e);
        internal_error("Failed to load defaults")
    })?;
    Ok(Json(layout))
}

/// Replace the default layout with the submitted positions/transforms
pub async fn set_defaults(
    State(state): State<AppState>,
    Json(request): Json<SetDefaultsRequest>,
) -> ApiResult<ApiAck> {
    let layout = state
        .defaults
        .save_async(request.default_positions, request.default_transforms)
        .await
        .map_err(|e| {
            tracing::error!("Error setting defaults: {}", e);
            internal_error("Failed to set defaults")
        })?;

    tracing::info!(
        "New defaults set: {} positions, {} transforms",
        layout.positions.len(),
        layout.transforms.len()
    );
    Ok(Json(ApiAck {
        success: true,
        message: Some("Defaults updated successfully".to_string()),
        updated_at: layout.updated_at,
    }))
}

/// Best-effort save of the full chart snapshot
pub async fn save_selections(
    State(state): State<AppState>,
    Json(request): Json<SaveSelectionsRequest>,
) -> Json<ApiAck> {
    state.selections.record(request);
    Json(ApiAck::ok())
}
