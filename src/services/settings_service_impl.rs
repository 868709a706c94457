//! `SeaORM` implementation of the `SettingsService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::constants::settings::{CACHING_DESCRIPTION, CACHING_ENABLED_KEY};
use crate::db::Store;
use crate::services::settings_service::{CachingSetting, SettingsError, SettingsService};

/// Only the literal `"false"` disables caching.
fn parse_enabled(value: &str) -> bool {
    value.trim() != "false"
}

pub struct SeaOrmSettingsService {
    store: Store,
    caching_default: bool,
}

impl SeaOrmSettingsService {
    #[must_use]
    pub const fn new(store: Store, caching_default: bool) -> Self {
        Self {
            store,
            caching_default,
        }
    }
}

#[async_trait]
impl SettingsService for SeaOrmSettingsService {
    async fn caching_enabled(&self) -> bool {
        match self.caching_setting().await {
            Ok(setting) => setting.enabled,
            Err(e) => {
                warn!(error = %e, "Could not read caching setting, using default");
                self.caching_default
            }
        }
    }

    async fn caching_setting(&self) -> Result<CachingSetting, SettingsError> {
        let row = self.store.get_setting(CACHING_ENABLED_KEY).await?;

        Ok(match row {
            Some(row) => CachingSetting {
                enabled: parse_enabled(&row.value),
                description: row
                    .description
                    .unwrap_or_else(|| CACHING_DESCRIPTION.to_string()),
                persisted: true,
            },
            None => CachingSetting {
                enabled: self.caching_default,
                description: CACHING_DESCRIPTION.to_string(),
                persisted: false,
            },
        })
    }

    async fn set_caching_enabled(&self, enabled: bool) -> Result<CachingSetting, SettingsError> {
        let value = if enabled { "true" } else { "false" };
        self.store
            .set_setting(CACHING_ENABLED_KEY, value, Some(CACHING_DESCRIPTION))
            .await?;

        info!(enabled, "Social media caching setting updated");

        Ok(CachingSetting {
            enabled,
            description: CACHING_DESCRIPTION.to_string(),
            persisted: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_literal_false_disables() {
        assert!(!parse_enabled("false"));
        assert!(!parse_enabled(" false "));
        assert!(parse_enabled("true"));
        assert!(parse_enabled("FALSE"));
        assert!(parse_enabled(""));
    }

    #[tokio::test]
    async fn test_absent_setting_uses_default() {
        let store = Store::in_memory().await.unwrap();

        let on = SeaOrmSettingsService::new(store.clone(), true);
        assert!(on.caching_enabled().await);
        assert!(!on.caching_setting().await.unwrap().persisted);

        let off = SeaOrmSettingsService::new(store, false);
        assert!(!off.caching_enabled().await);
    }

    #[tokio::test]
    async fn test_toggle_persists() {
        let store = Store::in_memory().await.unwrap();
        let service = SeaOrmSettingsService::new(store.clone(), true);

        let setting = service.set_caching_enabled(false).await.unwrap();
        assert!(!setting.enabled);
        assert!(!service.caching_enabled().await);

        let row = store.get_setting(CACHING_ENABLED_KEY).await.unwrap().unwrap();
        assert_eq!(row.value, "false");

        service.set_caching_enabled(true).await.unwrap();
        assert!(service.caching_enabled().await);
    }
}
