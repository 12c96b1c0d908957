use detik_client::image::looks_like_bad_image;

use crate::article::{Article, Content, ContentFormat};
use crate::clean::best_content;
use crate::error::Result;
use crate::source::PageSource;

pub const DEFAULT_CONTENT_LIMIT: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub include_content: bool,
    pub content_limit: Option<usize>,
    pub format: ContentFormat,
    /// Replace missing or poor listing images with the article's `og:image`.
    pub use_og_image: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            include_content: false,
            content_limit: Some(DEFAULT_CONTENT_LIMIT),
            format: ContentFormat::String,
            use_og_image: false,
        }
    }
}

/// Fetch the listing of `tag` and normalize its entries.
/// When content or `og:image` backfill is enabled, article pages are fetched one at a time.
pub async fn scrape(source: &dyn PageSource, tag: &str, options: &ScrapeOptions) -> Result<Vec<Article>> {
    let listing = source.listing(tag).await?;
    let mut articles = listing.entries.into_iter().map(Article::from).collect::<Vec<_>>();

    if options.use_og_image || options.include_content {
        for article in articles.iter_mut() {
            backfill(source, article, options).await;
        }
    }

    tracing::info!(tag, count = articles.len(), "Scraped detik listing");
    Ok(articles)
}

/// Like [`scrape`], but a failed listing yields no articles.
pub async fn scrape_or_empty(source: &dyn PageSource, tag: &str, options: &ScrapeOptions) -> Vec<Article> {
    match scrape(source, tag, options).await {
        Ok(articles) => articles,
        Err(e) => {
            tracing::warn!(tag, "Failed to scrape listing: {}", e);
            vec![]
        }
    }
}

async fn backfill(source: &dyn PageSource, article: &mut Article, options: &ScrapeOptions) {
    let needs_image = article.image.as_deref().map_or(true, looks_like_bad_image);
    let needs_content = options.include_content && article.content.is_none();
    if !needs_image && !needs_content {
        return;
    }

    let page = match source.article(&article.link).await {
        Ok(page) => Some(page),
        Err(e) => {
            tracing::warn!(link = %article.link, "Failed to fetch article page: {}", e);
            None
        }
    };

    if needs_image {
        if let Some(og_image) = page.as_ref().and_then(|p| p.og_image.clone()) {
            article.image = Some(og_image);
        }
    }
    if needs_content {
        let raw = page.as_ref().and_then(|p| p.content.as_deref());
        let text = best_content(raw, article.excerpt.as_deref(), &article.title, options.content_limit);
        article.content = Some(Content::render(&text, options.format));
    }
}
