use anyhow::Context;

use std::path::PathBuf;
use std::time::Duration;

use detik_client::{ClientOptions, ARTICLE_TIMEOUT_MS, BASE_URL, LISTING_TIMEOUT_MS};
use news_core::tags::DEFAULT_TAGS;
use news_core::TagConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_TAG_TIMEOUT_MS: u64 = 15000;
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_CORS_ORIGINS: &str = "https://city-news-detik.vercel.app";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub client: ClientOptions,
    pub tags: TagConfig,
    pub use_og_image: bool,
    pub cache_ttl: Duration,
    /// Upper bound on fetching one tag of a multi-tag request.
    pub tag_timeout: Duration,
    pub static_dir: PathBuf,
    /// Restricts CORS to `cors_origins`.
    pub production: bool,
    pub cors_origins: Vec<String>,
}

fn flag(value: Option<String>) -> bool {
    matches!(value.as_deref().map(str::trim), Some("1") | Some("true"))
}

fn list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let number = |key: &str, default: u64| -> anyhow::Result<u64> {
            match var(key) {
                Some(value) => value
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a non-negative integer, got {:?}", key, value)),
                None => Ok(default),
            }
        };

        let server_address = match var("SERVER_ADDRESS") {
            Some(addr) => addr,
            None => format!("0.0.0.0:{}", number("PORT", DEFAULT_PORT as u64)?),
        };
        let client = ClientOptions {
            base_url: var("DETIK_BASE_URL").unwrap_or_else(|| BASE_URL.to_string()),
            listing_timeout: Duration::from_millis(number("LISTING_TIMEOUT_MS", LISTING_TIMEOUT_MS)?),
            article_timeout: Duration::from_millis(number("ARTICLE_TIMEOUT_MS", ARTICLE_TIMEOUT_MS)?),
        };
        let tags = match var("NEWS_TAGS") {
            Some(tags) => list(&tags),
            None => DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
        };

        Ok(Config {
            server_address,
            client,
            tags: TagConfig::new(tags, flag(var("ALLOW_ALL_TAGS"))),
            use_og_image: flag(var("USE_OG_IMAGE")),
            cache_ttl: Duration::from_secs(number("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?),
            tag_timeout: Duration::from_millis(number("FETCH_TIMEOUT_MS", DEFAULT_TAG_TIMEOUT_MS)?),
            static_dir: PathBuf::from(var("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())),
            production: var("APP_ENV").is_some_and(|env| env == "production"),
            cors_origins: list(&var("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())),
        })
    }
}
