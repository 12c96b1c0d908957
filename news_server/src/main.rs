mod config;
mod error;
mod payload;
mod router;
mod state;
mod util;

use dotenvy::dotenv;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use std::sync::Arc;

use detik_client::DetikClient;
use news_core::{Caches, NewsApi, ScrapeOptions};

use crate::{config::Config, state::AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Initialize logger
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env()
        .unwrap()
        .add_directive("hyper::proto=info".parse().unwrap())
        .add_directive("hyper::client=info".parse().unwrap())
        .add_directive("reqwest=info".parse().unwrap())
        .add_directive("html5ever=info".parse().unwrap())
        .add_directive("selectors=info".parse().unwrap());
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // 2. Load configuration
    let config = Config::from_env().expect("invalid configuration");
    tracing::info!(
        tags = ?config.tags.tags,
        allow_all = config.tags.allow_all,
        use_og_image = config.use_og_image,
        "Configuration loaded"
    );

    // 3. Initialize client and caches
    let client = DetikClient::new(config.client.clone()).expect("cannot create detik client");
    let caches = Caches::new(config.cache_ttl);
    let options = ScrapeOptions {
        use_og_image: config.use_og_image,
        ..Default::default()
    };
    let mut news = NewsApi::new(Arc::new(client), caches, options);
    news.tag_timeout = config.tag_timeout;

    // 4. Setup state and router
    let app_state = AppState {
        tags: config.tags.clone(),
        news,
    };
    let app = router::app(app_state, &config);

    // 5. Start server
    let addr = &config.server_address;
    tracing::info!("Server starting at {}", addr);
    axum::Server::bind(&addr.parse().expect("SERVER_ADDRESS must be a socket address"))
        .serve(app.into_make_service())
        .await
        .unwrap();
}
