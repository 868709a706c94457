pub use super::social_media_cache::Entity as SocialMediaCache;
pub use super::system_settings::Entity as SystemSettings;
