pub mod prelude;

pub mod social_media_cache;
pub mod system_settings;
