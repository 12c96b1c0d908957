use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::aggregate::{self, Aggregate, Keyword, Page, SortOrder, TagWarning};
use crate::article::Article;
use crate::cache::{listing_key, search_key, TtlCache};
use crate::error::{Error, Result};
use crate::scrape::{scrape, ScrapeOptions};
use crate::source::PageSource;

pub type SharedCache<V> = Arc<RwLock<TtlCache<V>>>;

/// Default bound on fetching a single tag, on top of the client's own request timeouts.
pub const TAG_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub query: String,
    pub total: usize,
    pub searched_tags: Vec<String>,
    pub data: Vec<Article>,
}

#[derive(Debug, Clone)]
pub struct Caches {
    pub listings: SharedCache<Vec<Article>>,
    pub searches: SharedCache<SearchResult>,
}

impl Caches {
    pub fn new(ttl: Duration) -> Self {
        Self {
            listings: Arc::new(RwLock::new(TtlCache::new(ttl))),
            searches: Arc::new(RwLock::new(TtlCache::new(ttl))),
        }
    }

    /// Number of stored entries across all caches.
    pub async fn size(&self) -> usize {
        self.listings.read().await.len() + self.searches.read().await.len()
    }
}

#[derive(Debug, Clone)]
pub struct NewsQuery {
    pub tags: Vec<String>,
    pub page: usize,
    pub limit: usize,
    pub sort: SortOrder,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewsPage {
    pub page: Page<Article>,
    pub warnings: Vec<TagWarning>,
}

/// Aggregated listings behind the shared caches.
/// Locks are never held across a fetch, so concurrent misses of one key may both scrape.
#[derive(Clone)]
pub struct NewsApi {
    pub source: Arc<dyn PageSource>,
    pub caches: Caches,
    pub options: ScrapeOptions,
    pub tag_timeout: Duration,
}

impl NewsApi {
    pub fn new(source: Arc<dyn PageSource>, caches: Caches, options: ScrapeOptions) -> Self {
        Self {
            source,
            caches,
            options,
            tag_timeout: TAG_TIMEOUT,
        }
    }

    /// Articles of one tag, served from the listing cache while fresh. Failures are not cached.
    pub async fn fetch_tag(&self, tag: &str, date: Option<NaiveDate>) -> Result<Vec<Article>> {
        let date = date.map(|d| d.format("%Y-%m-%d").to_string());
        let key = listing_key(tag, date.as_deref());

        let cached = self.caches.listings.read().await.get(&key);
        if let Some(articles) = cached {
            tracing::debug!(key = %key, "Listing cache hit");
            return Ok(articles);
        }

        let articles = scrape(self.source.as_ref(), tag, &self.options).await?;
        self.caches.listings.write().await.insert(key, articles.clone());
        Ok(articles)
    }

    /// Fetch all tags concurrently, each bounded by `tag_timeout`, and merge them in request order.
    pub async fn fetch_tags(&self, tags: &[String], date: Option<NaiveDate>) -> Aggregate {
        let fetches = tags.iter().map(|tag| async move {
            let result = match tokio::time::timeout(self.tag_timeout, self.fetch_tag(tag, date)).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout(format!(
                    "fetching tag {} took longer than {}ms",
                    tag,
                    self.tag_timeout.as_millis()
                ))),
            };
            (tag.clone(), result)
        });
        let aggregate = aggregate::merge(futures::future::join_all(fetches).await);
        for warning in aggregate.warnings.iter() {
            tracing::warn!(tag = %warning.tag, "Failed to fetch tag: {}", warning.error);
        }
        aggregate
    }

    /// Filtered, sorted and paginated aggregate of `query.tags`.
    pub async fn news(&self, query: &NewsQuery) -> NewsPage {
        let Aggregate {
            mut articles,
            warnings,
        } = self.fetch_tags(&query.tags, query.date).await;

        if let Some(category) = query.category.as_deref() {
            articles = aggregate::filter_keyword(articles, category);
        }
        if let Some(date) = query.date {
            articles = aggregate::filter_date(articles, date);
        }
        aggregate::sort(&mut articles, query.sort);

        NewsPage {
            page: aggregate::paginate(articles, query.page, query.limit),
            warnings,
        }
    }

    /// Keyword search over the listings of `tags`. Whole results are cached by query, tags and limit.
    pub async fn search(&self, query: &str, tags: &[String], limit: usize) -> SearchResult {
        let key = search_key(query, tags, limit);
        let cached = self.caches.searches.read().await.get(&key);
        if let Some(result) = cached {
            tracing::debug!(key = %key, "Search cache hit");
            return SearchResult {
                query: query.to_string(),
                ..result
            };
        }

        let aggregate = self.fetch_tags(tags, None).await;
        let data = aggregate::filter_keyword(aggregate.articles, query)
            .into_iter()
            .take(limit)
            .collect::<Vec<_>>();
        let result = SearchResult {
            query: query.to_string(),
            total: data.len(),
            searched_tags: tags.to_vec(),
            data,
        };

        self.caches.searches.write().await.insert(key, result.clone());
        result
    }

    /// Most frequent words in the current titles of `tags`.
    pub async fn trending(&self, tags: &[String], limit: usize) -> Vec<Keyword> {
        let aggregate = self.fetch_tags(tags, None).await;
        let titles = aggregate.articles.iter().map(|a| a.title.as_str()).collect::<Vec<_>>();
        aggregate::trending(&titles, limit)
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::source::stub::{entry, StubSource};

    fn source() -> Arc<StubSource> {
        let jakarta = vec![
            entry("Banjir rendam Kemang", "https://news.detik.com/d-1", "2 jam lalu"),
            entry("Pemilu Jakarta digelar", "https://news.detik.com/d-2", "12 Agu 2024"),
            entry("Banjir surut di Cawang", "https://news.detik.com/d-3", "11 Agu 2024"),
        ];
        let bandung = vec![entry("Banjir bandang Bandung", "https://news.detik.com/d-4", "1 jam lalu")];
        Arc::new(
            StubSource::default()
                .with_listing("jakarta", jakarta)
                .with_listing("bandung", bandung),
        )
    }

    fn api(source: Arc<StubSource>) -> NewsApi {
        NewsApi::new(source, Caches::new(Duration::from_secs(300)), ScrapeOptions::default())
    }

    fn tags(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn query(tags: Vec<String>) -> NewsQuery {
        NewsQuery {
            tags,
            page: 1,
            limit: 10,
            sort: SortOrder::Newest,
            category: None,
            date: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_tag_is_cached() {
        let source = source();
        let api = api(source.clone());

        let first = api.fetch_tag("jakarta", None).await.unwrap();
        let second = api.fetch_tag("jakarta", None).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.listing_calls.load(Ordering::SeqCst), 1);

        // Another date is another key.
        api.fetch_tag("jakarta", NaiveDate::from_ymd_opt(2024, 8, 12)).await.unwrap();
        assert_eq!(source.listing_calls.load(Ordering::SeqCst), 2);

        // Failures are not cached.
        assert!(api.fetch_tag("medan", None).await.is_err());
        assert!(api.fetch_tag("medan", None).await.is_err());
        assert_eq!(source.listing_calls.load(Ordering::SeqCst), 4);
        assert_eq!(api.caches.size().await, 2);
    }

    #[tokio::test]
    async fn test_news() {
        let api = api(source());

        let page = api.news(&query(tags(&["jakarta", "medan", "bandung"]))).await;
        assert_eq!(page.page.total, 4);
        assert_eq!(page.warnings.len(), 1);
        assert_eq!(page.warnings[0].tag, "medan");
        assert_eq!(page.page.items[3].source_tag.as_deref(), Some("bandung"));

        let page = api
            .news(&NewsQuery {
                category: Some("BANJIR".to_string()),
                sort: SortOrder::Oldest,
                limit: 2,
                ..query(tags(&["jakarta", "bandung"]))
            })
            .await;
        assert_eq!(page.page.total, 3);
        assert_eq!(page.page.total_pages, 2);
        let titles = page.page.items.iter().map(|a| a.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Banjir bandang Bandung", "Banjir surut di Cawang"]);

        let page = api
            .news(&NewsQuery {
                date: NaiveDate::from_ymd_opt(2024, 8, 12),
                ..query(tags(&["jakarta"]))
            })
            .await;
        let titles = page.page.items.iter().map(|a| a.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Banjir rendam Kemang", "Pemilu Jakarta digelar"]);
    }

    #[tokio::test]
    async fn test_search() {
        let source = source();
        let api = api(source.clone());

        let result = api.search("banjir", &tags(&["jakarta", "bandung"]), 2).await;
        assert_eq!(result.total, 2);
        assert_eq!(result.searched_tags, tags(&["jakarta", "bandung"]));
        assert_eq!(result.data[1].title, "Banjir surut di Cawang");

        let again = api.search("banjir", &tags(&["jakarta", "bandung"]), 2).await;
        assert_eq!(again, result);
        assert_eq!(source.listing_calls.load(Ordering::SeqCst), 2);

        let upper = api.search("BANJIR", &tags(&["jakarta", "bandung"]), 2).await;
        assert_eq!(upper.query, "BANJIR");
        assert_eq!(upper.data, result.data);
        assert_eq!(source.listing_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_trending() {
        let api = api(source());
        let keywords = api.trending(&tags(&["jakarta", "bandung"]), 1).await;
        assert_eq!(
            keywords,
            vec![Keyword {
                keyword: "banjir".to_string(),
                count: 3
            }]
        );
    }
}
