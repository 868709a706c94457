pub mod ai_resolver;
pub use ai_resolver::AiResolver;

pub mod cache_store;
pub use cache_store::{CacheEntry, CacheStore, cache_key};

pub mod classifier;
pub use classifier::{classify, is_hospitality_business, is_trade_business};

pub mod link_extractor;
pub use link_extractor::{LinkExtractor, ScrapedLinks};

pub mod resolution_service;
pub use resolution_service::{
    ResolutionService, ResolveError, ResolveOutcome, ResolveRequest, StrategyStatus,
};

pub mod resolution_service_impl;
pub use resolution_service_impl::{DefaultResolutionService, google_entry};

pub mod search_resolver;
pub use search_resolver::SearchResolver;

pub mod settings_service;
pub use settings_service::{CachingSetting, SettingsError, SettingsService};

pub mod settings_service_impl;
pub use settings_service_impl::SeaOrmSettingsService;

pub mod verification;
pub use verification::Verifier;
