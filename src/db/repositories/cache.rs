use crate::entities::{prelude::*, social_media_cache};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
    sea_query::OnConflict,
};

/// Row to write into `social_media_cache`.
#[derive(Debug, Clone)]
pub struct CacheRow {
    pub key: String,
    pub business_name: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub data: String,
    pub created_at: String,
    pub expires_at: String,
}

pub struct SocialCacheRepository {
    conn: DatabaseConnection,
}

impl SocialCacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, key: &str) -> Result<Option<social_media_cache::Model>> {
        Ok(SocialMediaCache::find_by_id(key.to_string())
            .one(&self.conn)
            .await?)
    }

    pub async fn upsert(&self, row: CacheRow) -> Result<()> {
        let active_model = social_media_cache::ActiveModel {
            key: Set(row.key),
            business_name: Set(row.business_name),
            address: Set(row.address),
            website: Set(row.website),
            data: Set(row.data),
            created_at: Set(row.created_at),
            expires_at: Set(row.expires_at),
        };

        SocialMediaCache::insert(active_model)
            .on_conflict(
                OnConflict::column(social_media_cache::Column::Key)
                    .update_columns([
                        social_media_cache::Column::BusinessName,
                        social_media_cache::Column::Address,
                        social_media_cache::Column::Website,
                        social_media_cache::Column::Data,
                        social_media_cache::Column::CreatedAt,
                        social_media_cache::Column::ExpiresAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<bool> {
        let res = SocialMediaCache::delete_by_id(key.to_string())
            .exec(&self.conn)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Removes every row whose `expires_at` is before `now` (RFC 3339).
    pub async fn delete_expired(&self, now: &str) -> Result<u64> {
        let res = SocialMediaCache::delete_many()
            .filter(social_media_cache::Column::ExpiresAt.lt(now))
            .exec(&self.conn)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn clear(&self) -> Result<u64> {
        let res = SocialMediaCache::delete_many().exec(&self.conn).await?;
        Ok(res.rows_affected)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(SocialMediaCache::find().count(&self.conn).await?)
    }
}
