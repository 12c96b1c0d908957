use news_core::{NewsApi, TagConfig};

#[derive(Clone)]
pub struct AppState {
    /// Tag allow-list shared by every endpoint
    pub tags: TagConfig,
    /// Listing and search caches together with the page source behind them
    pub news: NewsApi,
}
