pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub mod cache {

    pub const KEY_VERSION: &str = "social:v2";

    pub const KEY_DELIMITER: char = '|';

    pub const TTL_DAYS: i64 = 30;

    pub const MAX_TTL_DAYS: i64 = 3650;
}

pub mod settings {

    pub const CACHING_ENABLED_KEY: &str = "social_media_caching_enabled";

    pub const CACHING_DESCRIPTION: &str =
        "Whether to cache social media search results (30 days)";
}

pub mod timeouts {

    pub const SCRAPE_MS: u64 = 3000;

    pub const SEARCH_MS: u64 = 8000;

    pub const AI_MS: u64 = 10_000;

    pub const EXISTENCE_MS: u64 = 5000;

    pub const RELEVANCE_MS: u64 = 5000;
}

pub mod relevance {

    pub const CONTENT_MATCH_THRESHOLD: f64 = 0.6;

    pub const URL_MATCH_THRESHOLD: f64 = 0.5;
}

pub mod ai {

    pub const NOT_FOUND_SENTINEL: &str = "NOT_FOUND";

    pub const TEMPERATURE: f32 = 0.1;

    pub const MAX_TOKENS: u32 = 200;

    pub const TRUSTPILOT_URL_SHAPE: &str = "https://www.trustpilot.com/review/domain-name";
}
