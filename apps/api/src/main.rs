mod aggregation;
mod config;
mod db;
mod errors;
mod models;
mod providers;
mod routes;
mod state;
mod subscriptions;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::aggregation::aggregator::{Aggregator, AggregatorOptions};
use crate::aggregation::fanout::{FanOutDriver, FanOutOptions};
use crate::config::Config;
use crate::db::create_pool;
use crate::providers::linkedin::LinkedInSearch;
use crate::providers::{
    build_http_client, GoogleJobsProvider, IndeedProvider, JobProvider, LinkedInProvider,
    ProviderSettings,
};
use crate::routes::build_router;
use crate::state::AppState;
use crate::subscriptions::PgDirectory;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobScoop API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.db_max_connections).await?;
    let directory = Arc::new(PgDirectory::new(db));

    // Initialize providers (one HTTP client, one API key)
    let aggregator = build_aggregator(&config)?;
    info!(
        "Aggregator ready (timeout {}s, primary retries {})",
        config.provider_timeout_secs, config.primary_max_retries
    );

    let driver = FanOutDriver::new(
        Arc::new(aggregator),
        directory.clone(),
        directory,
        FanOutOptions {
            max_concurrency: config.fanout_concurrency,
            dedup: config.job_dedup,
        },
    );

    let state = AppState {
        jobs: Arc::new(driver),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// LinkedIn is the primary source; Google and Indeed only enrich results.
fn build_aggregator(config: &Config) -> Result<Aggregator> {
    let client = build_http_client().context("Failed to build HTTP client")?;
    let settings = ProviderSettings::new(config.scraping_dog_api_key.clone())
        .with_base_url(config.provider_base_url.clone());

    let primary = Arc::new(LinkedInProvider::new(
        client.clone(),
        settings.clone(),
        LinkedInSearch {
            geoid: config.linkedin_geoid.clone(),
            ..LinkedInSearch::default()
        },
    ));
    let secondaries: Vec<Arc<dyn JobProvider>> = vec![
        Arc::new(GoogleJobsProvider::new(client.clone(), settings.clone())),
        Arc::new(IndeedProvider::new(client, settings)),
    ];

    Ok(Aggregator::new(
        primary,
        secondaries,
        AggregatorOptions {
            provider_timeout: Duration::from_secs(config.provider_timeout_secs),
            primary_retries: config.primary_max_retries,
            ..AggregatorOptions::default()
        },
    ))
}
