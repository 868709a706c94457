use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SocialMediaCache::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SocialMediaCache::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SocialMediaCache::BusinessName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SocialMediaCache::Address).string().null())
                    .col(ColumnDef::new(SocialMediaCache::Website).string().null())
                    .col(ColumnDef::new(SocialMediaCache::Data).text().not_null())
                    .col(
                        ColumnDef::new(SocialMediaCache::CreatedAt)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialMediaCache::ExpiresAt)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_social_media_cache_expires_at")
                    .table(SocialMediaCache::Table)
                    .col(SocialMediaCache::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SocialMediaCache::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SocialMediaCache {
    Table,
    Key,
    BusinessName,
    Address,
    Website,
    Data,
    CreatedAt,
    ExpiresAt,
}
