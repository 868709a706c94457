use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    DefaultResolutionService, ResolutionService, SeaOrmSettingsService, SettingsService,
};

/// Build a shared HTTP client for the search and AI APIs.
/// Reused across providers so they share one connection pool.
fn build_shared_http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("presence-resolver/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub settings: Arc<dyn SettingsService>,

    pub resolver: Arc<dyn ResolutionService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    /// Wires services on top of an already-migrated store.
    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client()?;

        let settings = Arc::new(SeaOrmSettingsService::new(
            store.clone(),
            config.resolver.caching_enabled_default,
        )) as Arc<dyn SettingsService>;

        let resolver = Arc::new(DefaultResolutionService::from_config(
            &config,
            store.clone(),
            settings.clone(),
            &http_client,
        )?) as Arc<dyn ResolutionService>;

        Ok(Self::from_parts(config, store, settings, resolver))
    }

    /// Assembles state from prebuilt services.
    #[must_use]
    pub fn from_parts(
        config: Config,
        store: Store,
        settings: Arc<dyn SettingsService>,
        resolver: Arc<dyn ResolutionService>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            settings,
            resolver,
        }
    }
}
