// Main entry point for the promo extraction API server

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promo_extraction::{AiConfig, AiExtractor, Extractor, Orchestrator};

mod app;
mod config;

use app::{build_app, AppState};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,promo_extraction=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting promo extraction API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Remote strategy only when a provider is selected and keyed
    let primary: Option<Arc<dyn Extractor>> = match (config.llm_provider.as_str(), &config.api_key)
    {
        ("abacus", Some(api_key)) => {
            let ai = AiExtractor::new(
                AiConfig::new("abacus", api_key.clone(), config.model.clone())
                    .with_base_url(config.base_url.clone())
                    .with_timeout(config.timeout)
                    .with_retry(config.retry),
            );
            tracing::info!(model = %config.model, "AI extractor initialized");
            Some(Arc::new(ai))
        }
        ("abacus", None) => {
            anyhow::bail!("LLM_PROVIDER=abacus requires ABACUS_API_KEY");
        }
        _ => {
            tracing::warn!("no LLM provider configured, running regex-only");
            None
        }
    };

    let orchestrator = Arc::new(Orchestrator::new(primary));
    let strategy = orchestrator.strategy();
    tracing::info!(
        primary = %strategy.primary,
        fallback = %strategy.fallback,
        "extraction strategy configured"
    );

    let state = AppState {
        orchestrator,
        llm_provider: config.llm_provider.clone(),
    };
    let app = build_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
