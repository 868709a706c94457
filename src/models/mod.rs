pub mod social;

pub use social::{FoundVia, PlatformEntry, SocialMediaLinks};
