mod consts;
mod error;
pub mod image;
mod parsing;
mod result;
mod selectors;

use reqwest::{header, Client, Url};
use scraper::Html;

use std::time::Duration;

pub use crate::consts::*;
pub use crate::error::Error;
use crate::error::Result;
pub use crate::parsing::{parse_article_page, parse_listing, resolve_url};
pub use crate::result::*;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub listing_timeout: Duration,
    pub article_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            base_url: BASE_URL.to_string(),
            listing_timeout: Duration::from_millis(LISTING_TIMEOUT_MS),
            article_timeout: Duration::from_millis(ARTICLE_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetikClient {
    pub options: ClientOptions,
    base_url: Url,
    client: reqwest::Client,
}

impl DetikClient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let base_url = Url::parse(&options.base_url)?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(DetikClient {
            options,
            base_url,
            client,
        })
    }

    /// URL of the listing page of `tag`.
    pub fn listing_url(&self, tag: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{}/tag/{}", base, urlencoding::encode(tag)))?;
        Ok(url)
    }

    /// Fetch and parse the listing page of `tag`.
    pub async fn listing(&self, tag: &str) -> Result<Listing> {
        let url = self.listing_url(tag)?;
        let html = self.fetch(url.clone(), self.options.listing_timeout).await?;
        log(&format!("tag_{}", tag), &html).await?;

        let entries = parse_listing(&Html::parse_document(&html), &url);
        tracing::debug!(tag, count = entries.len(), "Parsed detik listing");
        Ok(Listing {
            url: url.to_string(),
            entries,
        })
    }

    /// Fetch and parse an article detail page.
    pub async fn article(&self, url: &str) -> Result<ArticlePage> {
        let url = Url::parse(url)?;
        let html = self.fetch(url.clone(), self.options.article_timeout).await?;
        log(&format!("article_{}", url.path()), &html).await?;

        Ok(parse_article_page(&Html::parse_document(&html), &url))
    }
}

impl DetikClient {
    async fn fetch(&self, url: Url, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

async fn log(name: &str, content: &str) -> Result<()> {
    use std::path::PathBuf;
    use tokio::{fs::File, io::AsyncWriteExt};

    if let Ok(dir) = std::env::var("CLIENT_LOG_DIR") {
        let name = name.trim_matches('/').replace(['/', ':'], "_");
        let time = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let filepath = PathBuf::from(dir).join(format!("detik_{}_{}.html", name, time));
        let mut file = File::create(filepath).await?;
        file.write_all(content.as_bytes()).await?;
    }
    Ok(())
}
