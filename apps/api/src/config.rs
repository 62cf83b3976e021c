use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::aggregation::dedup::DedupStrategy;
use crate::providers::linkedin::DEFAULT_GEOID;
use crate::providers::DEFAULT_BASE_URL;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    /// One key shared by all three providers.
    pub scraping_dog_api_key: String,
    pub provider_base_url: String,
    pub linkedin_geoid: String,
    pub provider_timeout_secs: u64,
    pub primary_max_retries: u32,
    pub fanout_concurrency: usize,
    pub job_dedup: DedupStrategy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: optional_env("DB_MAX_CONNECTIONS", 5)?,
            scraping_dog_api_key: require_env("SCRAPING_DOG_API_KEY")?,
            provider_base_url: std::env::var("PROVIDER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            linkedin_geoid: std::env::var("LINKEDIN_GEOID")
                .unwrap_or_else(|_| DEFAULT_GEOID.to_string()),
            provider_timeout_secs: optional_env("PROVIDER_TIMEOUT_SECS", 30)?,
            primary_max_retries: optional_env("PRIMARY_MAX_RETRIES", 2)?,
            fanout_concurrency: optional_env("FANOUT_CONCURRENCY", 4)?,
            job_dedup: optional_env("JOB_DEDUP", DedupStrategy::None)?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow!("Environment variable '{key}' has invalid value '{raw}': {e}"))
}
