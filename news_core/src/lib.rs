pub mod aggregate;
pub mod api;
pub mod article;
pub mod cache;
pub mod clean;
pub mod error;
pub mod scrape;
pub mod source;
pub mod tags;

pub use api::{Caches, NewsApi, NewsQuery, SearchResult};
pub use article::{Article, Content, ContentFormat, Paragraph};
pub use cache::TtlCache;
pub use error::*;
pub use scrape::ScrapeOptions;
pub use source::PageSource;
pub use tags::TagConfig;
