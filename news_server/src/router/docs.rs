use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn docs_router() -> Router<AppState> {
    Router::new().route("/api/docs", get(docs))
}

async fn docs() -> Json<Value> {
    Json(json!({
        "title": "Detik News API Documentation",
        "version": "2.0.0",
        "endpoints": {
            "v1": {
                "GET /api/detik-news": "Basic news by city"
            },
            "v2": {
                "GET /api/v2/news": "Enhanced news with filters, pagination, multi-city support",
                "GET /api/v2/search": "Global search across cities",
                "GET /api/v2/categories": "Available news categories",
                "GET /api/v2/trending": "Trending keywords and topics",
                "GET /api/v2/stats": "API usage statistics"
            }
        },
        "examples": {
            "Single city": "/api/v2/news?tag=jakarta&limit=5",
            "Multiple cities": "/api/v2/news?tags=jakarta,bandung,surabaya&limit=10",
            "With pagination": "/api/v2/news?tag=jakarta&page=2&limit=5",
            "With category filter": "/api/v2/news?tag=jakarta&category=politik",
            "With date filter": "/api/v2/news?tag=jakarta&date=2024-08-12",
            "Full content": "/api/detik-news?tag=jakarta&content=true&format=paragraphs",
            "Global search": "/api/v2/search?q=pemilu&limit=20",
            "Search in specific city": "/api/v2/search?q=ekonomi&tag=jakarta"
        }
    }))
}
