use crate::config::Config;
use crate::db::Store;
use crate::services::{CacheStore, SeaOrmSettingsService, SettingsService};

pub async fn cmd_cache_purge(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let removed = CacheStore::new(store).purge_expired().await;
    println!("✓ Removed {removed} expired cache entries");
    Ok(())
}

pub async fn cmd_cache_clear(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let removed = CacheStore::new(store).clear().await;
    println!("✓ Removed {removed} cache entries");
    Ok(())
}

fn settings_service(config: &Config, store: Store) -> SeaOrmSettingsService {
    SeaOrmSettingsService::new(store, config.resolver.caching_enabled_default)
}

pub async fn cmd_caching_set(config: &Config, enabled: bool) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let setting = settings_service(config, store)
        .set_caching_enabled(enabled)
        .await?;
    println!(
        "✓ Caching {}",
        if setting.enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

pub async fn cmd_caching_status(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let setting = settings_service(config, store.clone())
        .caching_setting()
        .await?;
    let entries = store.count_cached_resolutions().await?;

    println!(
        "Caching: {}{}",
        if setting.enabled { "enabled" } else { "disabled" },
        if setting.persisted { "" } else { " (default)" }
    );
    println!("  {}", setting.description);
    println!("  Cached entries: {entries}");
    Ok(())
}
