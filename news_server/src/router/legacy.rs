use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use std::collections::HashMap;

use news_core::scrape::{scrape_or_empty, ScrapeOptions};
use news_core::ContentFormat;

use crate::{
    error::Result,
    payload::TagNewsResponse,
    state::AppState,
    util::{get_content_limit, get_flag, get_param},
};

pub const DEFAULT_TAG: &str = "karawang";

pub fn legacy_router() -> Router<AppState> {
    Router::new().route("/api/detik-news", get(detik_news))
}

/// Uncached listing of one tag, optionally with cleaned article content.
async fn detik_news(
    State(app_state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TagNewsResponse>> {
    let tag = app_state
        .tags
        .validate_one(get_param(&params, "tag").unwrap_or(DEFAULT_TAG))?;

    let include_content = get_flag(&params, "content") || get_flag(&params, "full");
    let options = ScrapeOptions {
        include_content,
        content_limit: Some(get_content_limit(&params)),
        format: ContentFormat::from_query(get_param(&params, "format")),
        use_og_image: app_state.news.options.use_og_image,
    };

    let data = scrape_or_empty(app_state.news.source.as_ref(), &tag, &options).await;
    Ok(Json(TagNewsResponse {
        source: format!("Detik - {}", tag),
        total: data.len(),
        tag,
        include_content,
        data,
    }))
}
