use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_NEWS_SERVICE_URL: &str = "http://127.0.0.1:8000/llm";
const DEFAULT_SESSION_IDLE_SECS: u64 = 1800;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the news generation/storage service, e.g. `http://host/llm`.
    pub news_service_url: String,
    pub news_service_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
    /// Compose and authoring sessions untouched for this long are dropped.
    pub session_idle: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            news_service_url: std::env::var("NEWS_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_NEWS_SERVICE_URL.to_string()),
            news_service_timeout: Duration::from_secs(
                std::env::var("NEWS_SERVICE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse::<u64>()
                    .context("NEWS_SERVICE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_idle: Duration::from_secs(
                std::env::var("SESSION_IDLE_SECS")
                    .map_or(Ok(DEFAULT_SESSION_IDLE_SECS), |v| v.parse::<u64>())
                    .context("SESSION_IDLE_SECS must be a whole number of seconds")?,
            ),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            news_service_url: DEFAULT_NEWS_SERVICE_URL.to_string(),
            news_service_timeout: Duration::from_secs(120),
            port: 8080,
            rust_log: "info".to_string(),
            session_idle: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
        }
    }
}
