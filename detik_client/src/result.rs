/// A raw article entry scraped from a tag listing page.
/// `link` and `image` are already resolved against the listing URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub title: String,
    pub link: String,
    pub time: String,
    pub excerpt: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Listing {
    pub url: String,
    pub entries: Vec<ListingEntry>,
}

/// What an article detail page offers for backfilling its listing entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticlePage {
    pub og_image: Option<String>,
    /// Uncleaned article text, paragraphs separated by blank lines.
    pub content: Option<String>,
}
