//! Domain service for persisted runtime settings.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<anyhow::Error> for SettingsError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachingSetting {
    pub enabled: bool,
    pub description: String,
    /// `false` when the value is the configured default rather than a
    /// stored row.
    pub persisted: bool,
}

#[async_trait::async_trait]
pub trait SettingsService: Send + Sync {
    /// Effective caching flag, read once per resolution request.
    ///
    /// Never fails: a storage error falls back to the configured default.
    async fn caching_enabled(&self) -> bool;

    /// # Errors
    ///
    /// Returns [`SettingsError::Database`] when the setting cannot be read.
    async fn caching_setting(&self) -> Result<CachingSetting, SettingsError>;

    /// # Errors
    ///
    /// Returns [`SettingsError::Database`] when the upsert fails.
    async fn set_caching_enabled(&self, enabled: bool) -> Result<CachingSetting, SettingsError>;
}
