use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::Provider;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Key prefix under which each campaign owns a `jd/` and `resumes/` folder.
    pub s3_prefix: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub llm_api_key: String,
    pub llm_provider: Provider,
    pub llm_model: String,
    pub llm_base_url: Option<String>,
    pub relevance_threshold: f64,
    pub poll_interval: Duration,
    pub notify_webhook_url: Option<String>,
    pub reviewer_email: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_provider = parse_provider(optional_env("LLM_PROVIDER"))?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            s3_prefix: optional_env("S3_PREFIX").unwrap_or_else(|| "campaigns/".to_string()),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_provider,
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            llm_base_url: optional_env("LLM_BASE_URL"),
            relevance_threshold: optional_env("RELEVANCE_THRESHOLD")
                .unwrap_or_else(|| "60".to_string())
                .parse::<f64>()
                .context("RELEVANCE_THRESHOLD must be a number")?,
            poll_interval: Duration::from_secs(
                optional_env("POLL_INTERVAL_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse::<u64>()
                    .context("POLL_INTERVAL_SECS must be a whole number of seconds")?,
            ),
            notify_webhook_url: optional_env("NOTIFY_WEBHOOK_URL"),
            reviewer_email: optional_env("REVIEWER_EMAIL"),
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Unset means the default provider.
fn parse_provider(value: Option<String>) -> Result<Provider> {
    Ok(value
        .map(|p| p.parse::<Provider>())
        .transpose()
        .context("LLM_PROVIDER must be one of openai, gemini, claude, ollama")?
        .unwrap_or_default())
}
