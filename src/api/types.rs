use serde::{Deserialize, Serialize};

use crate::models::SocialMediaLinks;
use crate::services::{CachingSetting, StrategyStatus};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Query string of `GET /api/places/social-media`. Everything arrives as
/// text and is checked in [`super::validation`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaQuery {
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub place_id: Option<String>,
    pub skip_cache: Option<String>,
    pub types: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SocialMediaResponse {
    pub success: bool,
    pub data: SocialMediaLinks,
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub struct CacheClearedDto {
    pub removed: u64,
}

#[derive(Debug, Serialize)]
pub struct CachingSettingDto {
    pub enabled: bool,
    pub description: String,
}

impl From<CachingSetting> for CachingSettingDto {
    fn from(setting: CachingSetting) -> Self {
        Self {
            enabled: setting.enabled,
            description: setting.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CachingResponse {
    pub success: bool,
    pub caching: CachingSettingDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub database: bool,
    pub caching_enabled: bool,
    pub cached_entries: u64,
    pub strategies: StrategyStatus,
}
