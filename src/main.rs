use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinemood_api::{
    config::Config,
    db::{create_redis_client, Cache},
    routes::create_router,
    services::{
        analyzer::GenAiAnalyzer, catalog::TmdbCatalog, genai::GenAiClient,
        generator::GenAiGenerator, pipeline::RecommendationPipeline,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = Cache::new(redis_client).await;

    let catalog = Arc::new(TmdbCatalog::new(
        cache,
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));

    let genai = Arc::new(GenAiClient::new(
        config.genai_api_key.clone(),
        config.genai_api_url.clone(),
        config.genai_model.clone(),
    ));

    let pipeline = Arc::new(RecommendationPipeline::new(
        Arc::new(GenAiAnalyzer::new(genai.clone())),
        Arc::new(GenAiGenerator::new(genai)),
        catalog.clone(),
    ));

    let state = AppState::new(pipeline, catalog);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    cache_writer.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
