use sea_orm_migration::prelude::*;

mod m20260301_create_social_media_cache;
mod m20260302_create_system_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_create_social_media_cache::Migration),
            Box::new(m20260302_create_system_settings::Migration),
        ]
    }
}
