//! Durable resolution cache.
//!
//! Every backing-store failure is logged and absorbed: reads degrade to a
//! miss, writes to a no-op.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::constants::cache::{KEY_DELIMITER, KEY_VERSION};
use crate::db::{CacheRow, Store};
use crate::models::SocialMediaLinks;

/// Deterministic key for a (name, address, website) triple.
///
/// Parts are trimmed and lower-cased, then percent-encoded so the
/// delimiter can never appear inside a part.
#[must_use]
pub fn cache_key(business_name: &str, address: Option<&str>, website: Option<&str>) -> String {
    let part = |s: Option<&str>| urlencoding::encode(&s.unwrap_or("").trim().to_lowercase()).into_owned();

    [
        KEY_VERSION.to_string(),
        part(Some(business_name)),
        part(address),
        part(website),
    ]
    .join(&KEY_DELIMITER.to_string())
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub business_name: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub data: SocialMediaLinks,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Entry for a fresh resolution, expiring `ttl_days` from now.
    /// `None` when the expiry is not representable.
    #[must_use]
    pub fn fresh(
        business_name: &str,
        address: Option<&str>,
        website: Option<&str>,
        data: SocialMediaLinks,
        ttl_days: i64,
    ) -> Option<Self> {
        let expires_at = Duration::try_days(ttl_days)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))?;

        Some(Self {
            key: cache_key(business_name, address, website),
            business_name: business_name.trim().to_string(),
            address: address.map(|a| a.trim().to_string()),
            website: website.map(|w| w.trim().to_string()),
            data,
            expires_at,
        })
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[derive(Clone)]
pub struct CacheStore {
    store: Store,
}

impl CacheStore {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns the entry for `key` unless it is missing, unreadable or
    /// expired. Expired and unreadable rows are deleted on the way out.
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        let row = match self.store.get_cached_resolution(key).await {
            Ok(Some(row)) => row,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        let expires_at = DateTime::parse_from_rfc3339(&row.expires_at)
            .map(|t| t.with_timezone(&Utc))
            .ok();
        let data = serde_json::from_str::<SocialMediaLinks>(&row.data).ok();

        let (Some(expires_at), Some(data)) = (expires_at, data) else {
            warn!(key = %key, "Dropping unreadable cache row");
            self.delete(key).await;
            return None;
        };

        let entry = CacheEntry {
            key: row.key,
            business_name: row.business_name,
            address: row.address,
            website: row.website,
            data,
            expires_at,
        };

        if entry.is_expired_at(Utc::now()) {
            debug!(key = %key, "Cache entry expired");
            self.delete(key).await;
            return None;
        }

        Some(entry)
    }

    /// Upsert by key. Last write wins.
    pub async fn put(&self, entry: &CacheEntry) {
        let data = match serde_json::to_string(&entry.data) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        let row = CacheRow {
            key: entry.key.clone(),
            business_name: entry.business_name.clone(),
            address: entry.address.clone(),
            website: entry.website.clone(),
            data,
            created_at: timestamp(Utc::now()),
            expires_at: timestamp(entry.expires_at),
        };

        if let Err(e) = self.store.upsert_cached_resolution(row).await {
            warn!(error = %e, key = %entry.key, "Cache write failed");
        }
    }

    pub async fn delete(&self, key: &str) {
        if let Err(e) = self.store.delete_cached_resolution(key).await {
            warn!(error = %e, key = %key, "Cache delete failed");
        }
    }

    /// Removes all expired rows. Returns the number removed, 0 on failure.
    pub async fn purge_expired(&self) -> u64 {
        match self
            .store
            .purge_expired_resolutions(&timestamp(Utc::now()))
            .await
        {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "Cache purge failed");
                0
            }
        }
    }

    pub async fn clear(&self) -> u64 {
        match self.store.clear_resolution_cache().await {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "Cache clear failed");
                0
            }
        }
    }
}
