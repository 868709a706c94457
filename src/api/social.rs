//! Social presence endpoints.

use axum::{
    Json,
    extract::{Query, State},
};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use super::validation::{optional_text, parse_flag, parse_tags, validate_business_name};
use super::{
    ApiError, ApiResponse, AppState, CacheClearedDto, SocialMediaQuery, SocialMediaResponse,
};
use crate::services::{ResolveError, ResolveRequest};

/// `GET /api/places/social-media`
///
/// Resolves profile and review links for one business. A panic anywhere in
/// the pipeline becomes a generic 500 instead of a partial answer.
pub async fn get_social_media(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SocialMediaQuery>,
) -> Result<Json<SocialMediaResponse>, ApiError> {
    let request = ResolveRequest {
        business_name: validate_business_name(query.business_name)?,
        address: optional_text(query.address),
        website: optional_text(query.website),
        place_id: optional_text(query.place_id),
        skip_cache: parse_flag(query.skip_cache.as_deref()),
        category_tags: parse_tags(query.types.as_deref()),
    };

    let outcome = AssertUnwindSafe(state.resolver().resolve(request))
        .catch_unwind()
        .await
        .map_err(|_| ResolveError::Internal("resolution panicked".to_string()))??;

    Ok(Json(SocialMediaResponse {
        success: true,
        data: outcome.data,
        cached: outcome.cached,
    }))
}

/// `DELETE /api/places/social-media/cache`
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<CacheClearedDto>> {
    let removed = state.resolver().clear_cache().await;
    Json(ApiResponse::success(CacheClearedDto { removed }))
}
