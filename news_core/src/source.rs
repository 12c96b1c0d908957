use async_trait::async_trait;

use detik_client::{ArticlePage, DetikClient, Listing};

use crate::error::Result;

/// Where listing and article pages come from.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn listing(&self, tag: &str) -> Result<Listing>;
    async fn article(&self, url: &str) -> Result<ArticlePage>;
}

#[async_trait]
impl PageSource for DetikClient {
    async fn listing(&self, tag: &str) -> Result<Listing> {
        Ok(DetikClient::listing(self, tag).await?)
    }

    async fn article(&self, url: &str) -> Result<ArticlePage> {
        Ok(DetikClient::article(self, url).await?)
    }
}
