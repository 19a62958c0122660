use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use moviedeck_backend::{
    api,
    config::AppConfig,
    database::Database,
    external::{MovieSource, TmdbCache, TmdbClient, TmdbMovieSource},
    models::ImageUrlBuilder,
    services::ImportService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also loads .env)
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,moviedeck_backend=debug,sqlx=warn")),
        )
        .init();

    // Initialize database
    let database = Database::connect(&config.database).await?;

    // Initialize TMDB source (optional)
    let (tmdb, images) = match config.tmdb.api_key.clone() {
        Some(api_key) => {
            let client = TmdbClient::new(&config.tmdb, api_key)?;

            // 图片服务配置获取失败时使用默认地址
            let images = match client.get_configuration().await {
                Ok(configuration) => configuration.image_url_builder(),
                Err(e) => {
                    tracing::warn!("Failed to fetch TMDB configuration, using default image URLs: {:#}", e);
                    ImageUrlBuilder::default()
                }
            };

            let cache = TmdbCache::new(Duration::from_secs(config.tmdb.person_cache_ttl_secs));
            let source = TmdbMovieSource::new(client, cache, config.import.cast_limit);
            (Some(source), images)
        }
        None => {
            tracing::warn!("TMDB_API_KEY not set, import endpoints are disabled");
            (None, ImageUrlBuilder::default())
        }
    };

    let importer = tmdb.clone().map(|source| {
        let source: Arc<dyn MovieSource> = Arc::new(source);
        Arc::new(ImportService::new(
            database.pool().clone(),
            source,
            config.import.max_range,
        ))
    });

    let app = api::create_router(api::AppState {
        database,
        importer,
        tmdb,
        images,
    });

    tracing::info!("🚀 Server listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
