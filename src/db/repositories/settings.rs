use crate::entities::{prelude::*, system_settings};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};

pub struct SettingsRepository {
    conn: DatabaseConnection,
}

impl SettingsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, key: &str) -> Result<Option<system_settings::Model>> {
        Ok(SystemSettings::find_by_id(key.to_string())
            .one(&self.conn)
            .await?)
    }

    pub async fn set(&self, key: &str, value: &str, description: Option<&str>) -> Result<()> {
        let active_model = system_settings::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            description: Set(description.map(str::to_string)),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        SystemSettings::insert(active_model)
            .on_conflict(
                OnConflict::column(system_settings::Column::Key)
                    .update_columns([
                        system_settings::Column::Value,
                        system_settings::Column::Description,
                        system_settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }
}
