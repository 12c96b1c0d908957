pub const BASE_URL: &str = "https://www.detik.com";

// Listing pages reject non-browser agents
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const LISTING_TIMEOUT_MS: u64 = 10000;
pub const ARTICLE_TIMEOUT_MS: u64 = 8000;

pub const EXCERPT_MAX_CHARS: usize = 200;
