use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{BROWSER_USER_AGENT, cache, timeouts};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub observability: ObservabilityConfig,

    pub resolver: ResolverConfig,

    pub search: SearchConfig,

    pub ai: AiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    #[serde(default)]
    pub suppress_connection_errors: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/presence.db".to_string(),
            log_level: "info".to_string(),
            suppress_connection_errors: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 6790,
            cors_allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Used when the persisted caching setting has never been written.
    pub caching_enabled_default: bool,

    pub cache_ttl_days: i64,

    pub scrape_timeout_ms: u64,

    pub search_timeout_ms: u64,

    pub ai_timeout_ms: u64,

    pub existence_timeout_ms: u64,

    pub relevance_timeout_ms: u64,

    /// Attach public search-page links to eligible review directories that
    /// ended without a verified link.
    pub include_search_fallbacks: bool,

    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            caching_enabled_default: true,
            cache_ttl_days: cache::TTL_DAYS,
            scrape_timeout_ms: timeouts::SCRAPE_MS,
            search_timeout_ms: timeouts::SEARCH_MS,
            ai_timeout_ms: timeouts::AI_MS,
            existence_timeout_ms: timeouts::EXISTENCE_MS,
            relevance_timeout_ms: timeouts::RELEVANCE_MS,
            include_search_fallbacks: false,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: Option<String>,

    pub base_url: String,

    pub engine: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://serpapi.com".to_string(),
            engine: "google".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub openai_api_key: Option<String>,

    pub openai_model: String,

    pub openai_base_url: String,

    pub gemini_api_key: Option<String>,

    pub gemini_model: String,

    pub gemini_base_url: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-pro".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
            resolver: ResolverConfig::default(),
            search: SearchConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                let mut config = Self::load_from_path(path)?;
                config.apply_env_overrides();
                return Ok(config);
            }
        }

        info!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Secrets from the environment win over the config file.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = non_empty(lookup("SERPAPI_KEY")) {
            self.search.api_key = Some(key);
        }
        if let Some(key) = non_empty(lookup("OPENAI_API_KEY")) {
            self.ai.openai_api_key = Some(key);
        }
        if let Some(key) = non_empty(lookup("GEMINI_API_KEY")) {
            self.ai.gemini_api_key = Some(key);
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("presence-resolver").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".presence-resolver").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=cache::MAX_TTL_DAYS).contains(&self.resolver.cache_ttl_days) {
            anyhow::bail!(
                "resolver.cache_ttl_days must be between 1 and {}",
                cache::MAX_TTL_DAYS
            );
        }

        if self.server.enabled && self.server.port == 0 {
            anyhow::bail!("server.port cannot be 0 when the server is enabled");
        }

        Ok(())
    }

    #[must_use]
    pub fn search_api_key(&self) -> Option<&str> {
        self.search
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }
}
