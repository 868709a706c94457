use axum::{Json, extract::State};
use std::sync::Arc;

use super::validation::validate_enabled_flag;
use super::{ApiError, AppState, CachingResponse};

/// `GET /api/settings/caching`
pub async fn get_caching(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CachingResponse>, ApiError> {
    let setting = state.settings().caching_setting().await?;
    Ok(Json(CachingResponse {
        success: true,
        caching: setting.into(),
    }))
}

/// `POST /api/settings/caching`
///
/// The body is taken as raw JSON so a non-boolean `enabled` answers 400
/// rather than the extractor's 422.
pub async fn set_caching(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CachingResponse>, ApiError> {
    let enabled = validate_enabled_flag(&body)?;
    let setting = state.settings().set_caching_enabled(enabled).await?;
    Ok(Json(CachingResponse {
        success: true,
        caching: setting.into(),
    }))
}
