use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use crate::entities::social_media_cache::Model as CachedResolution;
pub use crate::entities::system_settings::Model as SystemSetting;
pub use repositories::cache::CacheRow;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Single-connection in-memory store. SQLite gives each connection its own
    /// memory database, so the pool must not grow.
    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_options("sqlite::memory:", 1, 1).await
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn cache_repo(&self) -> repositories::cache::SocialCacheRepository {
        repositories::cache::SocialCacheRepository::new(self.conn.clone())
    }

    fn settings_repo(&self) -> repositories::settings::SettingsRepository {
        repositories::settings::SettingsRepository::new(self.conn.clone())
    }

    // ========== Social Media Cache ==========

    pub async fn get_cached_resolution(&self, key: &str) -> Result<Option<CachedResolution>> {
        self.cache_repo().get(key).await
    }

    pub async fn upsert_cached_resolution(&self, row: CacheRow) -> Result<()> {
        self.cache_repo().upsert(row).await
    }

    pub async fn delete_cached_resolution(&self, key: &str) -> Result<bool> {
        self.cache_repo().delete(key).await
    }

    pub async fn purge_expired_resolutions(&self, now: &str) -> Result<u64> {
        self.cache_repo().delete_expired(now).await
    }

    pub async fn clear_resolution_cache(&self) -> Result<u64> {
        self.cache_repo().clear().await
    }

    pub async fn count_cached_resolutions(&self) -> Result<u64> {
        self.cache_repo().count().await
    }

    // ========== System Settings ==========

    pub async fn get_setting(&self, key: &str) -> Result<Option<SystemSetting>> {
        self.settings_repo().get(key).await
    }

    pub async fn set_setting(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
    ) -> Result<()> {
        self.settings_repo().set(key, value, description).await
    }
}
