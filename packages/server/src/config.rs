use anyhow::{Context, Result};
use dotenvy::dotenv;
use secrecy::SecretString;
use std::env;
use std::time::Duration;

use promo_extraction::{retry, RetryPolicy};

/// Application configuration loaded from environment variables.
///
/// Captured once at startup; the extraction core only ever sees the
/// already-validated values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// "abacus" enables the remote strategy; anything else runs
    /// regex-only.
    pub llm_provider: String,
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let timeout_ms: u64 = env::var("ABACUS_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse()
            .context("ABACUS_TIMEOUT_MS must be a valid number")?;

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            llm_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "none".to_string()),
            api_key: env::var("ABACUS_API_KEY").ok().map(SecretString::from),
            model: env::var("ABACUS_MODEL").unwrap_or_else(|_| "claude-3-5-sonnet".to_string()),
            base_url: env::var("ABACUS_BASE_URL")
                .unwrap_or_else(|_| "https://routellm.abacus.ai/v1/chat/completions".to_string()),
            timeout: Duration::from_millis(timeout_ms),
            retry: retry_preset(&env::var("RETRY_PRESET").unwrap_or_else(|_| "standard".to_string()))?,
        })
    }
}

fn retry_preset(name: &str) -> Result<RetryPolicy> {
    match name {
        "fast" => Ok(retry::FAST),
        "standard" => Ok(retry::STANDARD),
        "aggressive" => Ok(retry::AGGRESSIVE),
        other => anyhow::bail!("unknown RETRY_PRESET: {other}"),
    }
}
