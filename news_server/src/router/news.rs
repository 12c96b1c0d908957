use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use std::collections::HashMap;

use news_core::aggregate::{parse_query_date, SortOrder, CATEGORIES, MAX_PAGE_SIZE};
use news_core::{tags, Error as NewsError, NewsQuery, SearchResult};

use crate::{
    error::Result,
    payload::{NewsFilters, NewsMeta, NewsResponse},
    state::AppState,
    util::*,
};

pub const ENDPOINTS: [&str; 5] = [
    "GET /api/v2/news",
    "GET /api/v2/search",
    "GET /api/v2/categories",
    "GET /api/v2/trending",
    "GET /api/v2/stats",
];

pub const FEATURES: [&str; 6] = [
    "Multi-city support",
    "Pagination",
    "Search functionality",
    "Caching",
    "Category filtering",
    "Trending analysis",
];

pub fn news_router() -> Router<AppState> {
    Router::new()
        .route("/api/v2/news", get(news))
        .route("/api/v2/search", get(search))
        .route("/api/v2/categories", get(categories))
        .route("/api/v2/trending", get(trending))
        .route("/api/v2/stats", get(stats))
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn news(
    State(app_state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<NewsResponse>> {
    let requested = match (get_param(&params, "tags"), get_param(&params, "tag")) {
        (Some(list), _) => tags::split_list(list),
        (None, Some(tag)) => vec![tag.to_string()],
        (None, None) => vec![],
    };
    if requested.is_empty() {
        return Err(NewsError::MissingParameter {
            name: "tag".to_string(),
            example: "/api/v2/news?tag=jakarta or /api/v2/news?tags=jakarta,bandung".to_string(),
        }
        .into());
    }
    let tags = app_state.tags.validate(requested)?;

    let date = get_param(&params, "date");
    let (page, limit) = get_page_and_limit(&params);
    let query = NewsQuery {
        tags: tags.clone(),
        page,
        limit,
        sort: SortOrder::from_query(get_param(&params, "sort")),
        category: get_param(&params, "category").map(str::to_string),
        date: date.map(parse_query_date).transpose()?,
    };

    let result = app_state.news.news(&query).await;
    let page = result.page;
    Ok(Json(NewsResponse {
        success: true,
        meta: NewsMeta {
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            tags,
            filters: NewsFilters {
                category: query.category,
                date: date.map(str::to_string),
                sort: query.sort,
            },
        },
        data: page.items,
        warnings: result.warnings,
    }))
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    success: bool,
    #[serde(flatten)]
    result: SearchResult,
}

async fn search(
    State(app_state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SearchResponse>> {
    let query = get_param(&params, "q").ok_or_else(|| NewsError::MissingParameter {
        name: "q".to_string(),
        example: "/api/v2/search?q=pemilu".to_string(),
    })?;
    let limit = get_number(&params, "limit", DEFAULT_SEARCH_LIMIT).clamp(1, MAX_PAGE_SIZE);
    let tags = match get_param(&params, "tag") {
        Some(tag) => vec![app_state.tags.validate_one(tag)?],
        None => app_state.tags.sample(SEARCH_TAG_COUNT),
    };

    let result = app_state.news.search(query, &tags, limit).await;
    Ok(Json(SearchResponse { success: true, result }))
}

async fn categories() -> Json<Value> {
    Json(json!({
        "success": true,
        "total": CATEGORIES.len(),
        "data": CATEGORIES,
    }))
}

async fn trending(State(app_state): State<AppState>, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let period = get_param(&params, "period").unwrap_or("daily");
    let limit = get_number(&params, "limit", DEFAULT_TRENDING_LIMIT).clamp(1, MAX_PAGE_SIZE);

    let keywords = app_state
        .news
        .trending(&app_state.tags.sample(TRENDING_TAG_COUNT), limit)
        .await;
    Json(json!({
        "success": true,
        "period": period,
        "generatedAt": now(),
        "total": keywords.len(),
        "data": keywords,
    }))
}

async fn stats(State(app_state): State<AppState>) -> Json<Value> {
    let cache_size = app_state.news.caches.size().await;
    Json(json!({
        "success": true,
        "timestamp": now(),
        "data": {
            "supportedCities": app_state.tags.tags.len(),
            "cacheSize": cache_size,
            "endpoints": ENDPOINTS,
            "features": FEATURES,
        }
    }))
}
