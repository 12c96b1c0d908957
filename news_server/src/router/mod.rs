pub mod docs;
pub mod legacy;
pub mod news;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{config::Config, state::AppState};

const SECURITY_HEADERS: [(HeaderName, &str); 5] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_XSS_PROTECTION, "1; mode=block"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (
        header::CONTENT_SECURITY_POLICY,
        "default-src 'self' 'unsafe-inline' data:; connect-src 'self' http: https:;",
    ),
];

/// Any origin in development; only the configured origins, with credentials, in production.
fn cors_layer(config: &Config) -> CorsLayer {
    if !config.production {
        return CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    }

    let origins = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// API routes with static files from `config.static_dir` as the fallback.
pub fn app(app_state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .merge(legacy::legacy_router())
        .merge(news::news_router())
        .merge(docs::docs_router())
        .fallback_service(ServeDir::new(&config.static_dir));

    for (name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value)));
    }

    router
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http().on_request(()))
        .with_state(app_state)
}

#[cfg(test)]
mod test {
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use detik_client::{ArticlePage, Listing, ListingEntry};
    use news_core::{Caches, Error as NewsError, NewsApi, PageSource, Result as NewsResult, ScrapeOptions};

    use super::*;

    /// Serves canned listings; unknown tags fail like an unreachable upstream.
    struct StubSource {
        listings: HashMap<String, Vec<ListingEntry>>,
        listing_calls: AtomicUsize,
    }

    #[async_trait]
    impl PageSource for StubSource {
        async fn listing(&self, tag: &str) -> NewsResult<Listing> {
            self.listing_calls.fetch_add(1, Ordering::SeqCst);
            let entries = self
                .listings
                .get(tag)
                .cloned()
                .ok_or_else(|| NewsError::Timeout(format!("listing of {}", tag)))?;
            Ok(Listing {
                url: format!("https://www.detik.com/tag/{}", tag),
                entries,
            })
        }

        async fn article(&self, url: &str) -> NewsResult<ArticlePage> {
            Err(NewsError::Timeout(format!("article {}", url)))
        }
    }

    fn entries(tag: &str, count: usize) -> Vec<ListingEntry> {
        (1..=count)
            .map(|i| ListingEntry {
                title: format!("Berita {} nomor {}", tag, i),
                link: format!("https://news.detik.com/berita/d-{}/{}", i, tag),
                time: format!("{} jam lalu", i),
                excerpt: Some(format!("Ringkasan berita {} yang ke {}", tag, i)),
                image: None,
            })
            .collect()
    }

    fn source() -> Arc<StubSource> {
        Arc::new(StubSource {
            listings: HashMap::from([
                ("jakarta".to_string(), entries("jakarta", 12)),
                ("bogor".to_string(), entries("bogor", 3)),
            ]),
            listing_calls: AtomicUsize::new(0),
        })
    }

    fn test_app(source: Arc<StubSource>) -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        let app_state = AppState {
            tags: config.tags.clone(),
            news: NewsApi::new(source, Caches::new(config.cache_ttl), ScrapeOptions::default()),
        };
        app(app_state, &config)
    }

    async fn send(app: &Router, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body(response: Response) -> Vec<u8> {
        hyper::body::to_bytes(response.into_body()).await.unwrap().to_vec()
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = send(app, uri).await;
        let status = response.status();
        (status, serde_json::from_slice(&body(response).await).unwrap())
    }

    #[tokio::test]
    async fn test_detik_news() {
        let app = test_app(source());
        let (status, json) = get_json(&app, "/api/detik-news?tag=Jakarta").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["source"], "Detik - jakarta");
        assert_eq!(json["total"], 12);
        assert_eq!(json["includeContent"], false);
        for item in json["data"].as_array().unwrap() {
            assert!(!item["title"].as_str().unwrap().is_empty());
            assert!(item["link"].as_str().unwrap().starts_with("https://"));
            assert_eq!(item["image"], Value::Null);
        }
    }

    #[tokio::test]
    async fn test_detik_news_with_content() {
        let app = test_app(source());
        let (status, json) = get_json(&app, "/api/detik-news?tag=bogor&full=true&format=paragraphs").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["includeContent"], true);
        // Article pages fail, so content falls back to the excerpt.
        assert_eq!(json["data"][0]["content"][0]["text"], "Ringkasan berita bogor yang ke 1");
        assert_eq!(json["data"][0]["content"][0]["id"], 1);
    }

    #[tokio::test]
    async fn test_detik_news_upstream_failure_is_empty() {
        let app = test_app(source());
        let (status, json) = get_json(&app, "/api/detik-news?tag=surabaya").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 0);
    }

    #[tokio::test]
    async fn test_disallowed_tag() {
        let source = source();
        let app = test_app(source.clone());

        let (status, json) = get_json(&app, "/api/detik-news?tag=medan").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["availableTags"][0], "karawang");

        let (status, json) = get_json(&app, "/api/v2/news?tags=jakarta,medan").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid tags: medan");

        let (status, _) = get_json(&app, "/api/v2/search?q=banjir&tag=medan").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(source.listing_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_parameters() {
        let app = test_app(source());

        let (status, json) = get_json(&app, "/api/v2/news").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["example"].as_str().unwrap().contains("tags="));

        let (status, json) = get_json(&app, "/api/v2/search?q=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["example"], "/api/v2/search?q=pemilu");

        let (status, _) = get_json(&app, "/api/v2/news?tag=jakarta&date=12-08-2024").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_news_pagination() {
        let app = test_app(source());
        let (status, json) = get_json(&app, "/api/v2/news?tags=jakarta,bogor&limit=5&page=3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["meta"]["total"], 15);
        assert_eq!(json["meta"]["totalPages"], 3);
        assert_eq!(json["meta"]["page"], 3);
        assert_eq!(json["meta"]["tags"], serde_json::json!(["jakarta", "bogor"]));
        assert_eq!(json["meta"]["filters"]["sort"], "newest");
        assert_eq!(json["meta"]["filters"]["category"], Value::Null);

        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 5);
        assert_eq!(data[0]["sourceTag"], "jakarta");
        assert_eq!(data[4]["sourceTag"], "bogor");
        assert!(json.get("warnings").is_none());
    }

    #[tokio::test]
    async fn test_news_warnings() {
        let app = test_app(source());
        let (status, json) = get_json(&app, "/api/v2/news?tags=jakarta,bandung&category=nomor%201").await;

        assert_eq!(status, StatusCode::OK);
        // "nomor 1", "nomor 10", "nomor 11", "nomor 12"
        assert_eq!(json["meta"]["total"], 4);
        assert_eq!(json["warnings"][0]["tag"], "bandung");
        assert_eq!(json["warnings"][0]["error"], "Timeout: listing of bandung");
    }

    #[tokio::test]
    async fn test_cached_payload_is_identical() {
        let source = source();
        let app = test_app(source.clone());

        let first = body(send(&app, "/api/v2/news?tag=jakarta&limit=3").await).await;
        let second = body(send(&app, "/api/v2/news?tag=jakarta&limit=3").await).await;
        assert_eq!(first, second);
        assert_eq!(source.listing_calls.load(Ordering::SeqCst), 1);

        let first = body(send(&app, "/api/v2/search?q=nomor&tag=bogor").await).await;
        let second = body(send(&app, "/api/v2/search?q=nomor&tag=bogor").await).await;
        assert_eq!(first, second);
        assert_eq!(source.listing_calls.load(Ordering::SeqCst), 2);

        let (_, json) = get_json(&app, "/api/v2/stats").await;
        assert_eq!(json["data"]["cacheSize"], 3);
        assert_eq!(json["data"]["supportedCities"], 5);
    }

    #[tokio::test]
    async fn test_search_defaults() {
        let app = test_app(source());
        let (status, json) = get_json(&app, "/api/v2/search?q=BOGOR").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["query"], "BOGOR");
        assert_eq!(json["total"], 3);
        assert_eq!(
            json["searchedTags"],
            serde_json::json!(["karawang", "jakarta", "bogor", "bandung", "surabaya"])
        );
    }

    #[tokio::test]
    async fn test_informational_endpoints() {
        let app = test_app(source());

        let (_, json) = get_json(&app, "/api/v2/categories").await;
        assert_eq!(json["total"], 8);
        assert_eq!(json["data"][0]["id"], "politik");

        let (_, json) = get_json(&app, "/api/v2/trending?limit=2").await;
        assert_eq!(json["period"], "daily");
        assert_eq!(
            json["data"],
            serde_json::json!([
                { "keyword": "berita", "count": 15 },
                { "keyword": "nomor", "count": 15 }
            ])
        );

        let (status, json) = get_json(&app, "/api/docs").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["endpoints"]["v2"]["GET /api/v2/news"].is_string());
    }

    #[tokio::test]
    async fn test_security_headers() {
        let app = test_app(source());
        let response = send(&app, "/api/v2/categories").await;
        let headers = response.headers();

        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
        assert!(headers.contains_key("content-security-policy"));
    }
}
