//! Strategy trait shared by the remote and heuristic extractors.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ExtractionRequest, ExtractionResult};

/// One concrete extraction algorithm.
///
/// Implementations wrap either a remote model provider or the local
/// regex pipeline, and are injected into the orchestrator. They must
/// be stateless across calls so unrelated requests can run
/// concurrently without locking.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Strategy name for logging and diagnostics.
    fn name(&self) -> &str;

    /// Whether the strategy is ready to serve requests.
    ///
    /// Reflects configuration only; run-time failures do not flip it.
    fn is_configured(&self) -> bool;

    /// Extract a normalized record from one promo message.
    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult>;
}
