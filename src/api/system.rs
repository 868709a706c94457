//! System API endpoints.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiResponse, AppState, SystemStatus};

/// Returns service status.
///
/// # Endpoint
/// `GET /api/system/status`
///
/// Reports database reachability, the effective caching flag, cache size,
/// and which discovery strategies have credentials.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<SystemStatus>> {
    let database = state.store().ping().await.is_ok();
    let cached_entries = if database {
        state.store().count_cached_resolutions().await.unwrap_or(0)
    } else {
        0
    };

    let status = SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        database,
        caching_enabled: state.settings().caching_enabled().await,
        cached_entries,
        strategies: state.resolver().strategies(),
    };

    Json(ApiResponse::success(status))
}
