use serde::Serialize;

use news_core::aggregate::{SortOrder, TagWarning};
use news_core::Article;

/// Response of the single-tag listing endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagNewsResponse {
    pub source: String,
    pub tag: String,
    pub total: usize,
    pub include_content: bool,
    pub data: Vec<Article>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsFilters {
    pub category: Option<String>,
    pub date: Option<String>,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsMeta {
    /// Number of matching articles before pagination.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub tags: Vec<String>,
    pub filters: NewsFilters,
}

/// Response of the aggregated news endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct NewsResponse {
    pub success: bool,
    pub meta: NewsMeta,
    pub data: Vec<Article>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TagWarning>,
}
