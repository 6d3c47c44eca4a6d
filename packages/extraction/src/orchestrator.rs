//! Strategy selection with automatic heuristic fallback.
//!
//! The remote strategy goes first when one is configured; any error
//! it surfaces (after its own retries) is logged and absorbed by
//! substituting the deterministic pipeline's result, so callers see a
//! record, not the remote failure.

use std::sync::Arc;

use serde::Serialize;

use crate::heuristics::HeuristicExtractor;
use crate::traits::Extractor;
use crate::types::{ExtractionRequest, ExtractionResult};

/// Current strategy configuration, for diagnostics.
///
/// Reflects configuration only; run-time failures do not change it.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyInfo {
    pub primary: String,
    pub fallback: String,
}

/// Top-level extraction entry point.
pub struct Orchestrator {
    primary: Option<Arc<dyn Extractor>>,
    fallback: HeuristicExtractor,
}

impl Orchestrator {
    /// Build with an optional primary (model-backed) strategy.
    ///
    /// Without one, every request goes straight to the deterministic
    /// pipeline.
    pub fn new(primary: Option<Arc<dyn Extractor>>) -> Self {
        Self {
            primary,
            fallback: HeuristicExtractor::new(),
        }
    }

    /// Extract a normalized record from one promo message.
    ///
    /// Infallible: the deterministic pipeline is total and always
    /// available as the fallback.
    pub async fn extract(&self, request: &ExtractionRequest) -> ExtractionResult {
        tracing::info!(
            message_id = request.message_id,
            chat = %request.chat,
            text_len = request.text.len(),
            "extract request received"
        );

        if let Some(primary) = self.primary.as_ref().filter(|p| p.is_configured()) {
            match primary.extract(request).await {
                Ok(result) => {
                    tracing::info!(
                        message_id = request.message_id,
                        provider = primary.name(),
                        "ai extraction successful"
                    );
                    self.log_completion(request.message_id, primary.name(), &result);
                    return result;
                }
                Err(error) => {
                    tracing::warn!(
                        message_id = request.message_id,
                        provider = primary.name(),
                        error = %error,
                        error_kind = error.kind(),
                        "ai extraction failed, falling back to regex"
                    );
                }
            }
        }

        let result = self.fallback.run(request);
        self.log_completion(request.message_id, self.fallback_name(), &result);
        result
    }

    /// Current primary/fallback strategy names.
    pub fn strategy(&self) -> StrategyInfo {
        let primary = match self.primary.as_ref().filter(|p| p.is_configured()) {
            Some(p) => format!("ai-{}", p.name()),
            None => self.fallback_name().to_string(),
        };
        StrategyInfo {
            primary,
            fallback: self.fallback_name().to_string(),
        }
    }

    fn fallback_name(&self) -> &str {
        Extractor::name(&self.fallback)
    }

    fn log_completion(&self, message_id: i64, extractor: &str, result: &ExtractionResult) {
        tracing::info!(
            message_id,
            extractor,
            coupons = result.coupons.len(),
            has_price = result.price.is_some(),
            has_product = result.product.is_some(),
            has_store = result.store.is_some(),
            has_product_key = result.product_key.is_some(),
            "extract completed"
        );
    }
}
