//! Structured data extraction from Brazilian-Portuguese promo text.
//!
//! Consumers hand in a raw Telegram-style marketing message and get
//! back a normalized record: product, price in centavos, store,
//! coupons, category. Two strategies implement the same contract:
//!
//! - [`AiExtractor`]: remote model call under a bounded
//!   exponential-backoff retry policy;
//! - [`HeuristicExtractor`]: deterministic regex pipeline, total and
//!   pure, used as the baseline and fallback.
//!
//! The [`Orchestrator`] prefers the remote strategy when configured
//! and transparently substitutes the heuristic result on any failure.
//!
//! ```rust,ignore
//! use promo_extraction::{AiConfig, AiExtractor, Orchestrator};
//!
//! let ai = AiExtractor::new(AiConfig::new("abacus", api_key, "claude-3-5-sonnet"));
//! let orchestrator = Orchestrator::new(Some(Arc::new(ai)));
//! let record = orchestrator.extract(&request).await;
//! ```

pub mod ai;
pub mod error;
pub mod heuristics;
pub mod orchestrator;
pub mod retry;
pub mod traits;
pub mod types;

pub use ai::{AiConfig, AiExtractor};
pub use error::{ExtractionError, Result};
pub use heuristics::HeuristicExtractor;
pub use orchestrator::{Orchestrator, StrategyInfo};
pub use retry::{run_with_retry, RetryPolicy, AGGRESSIVE, FAST, STANDARD};
pub use traits::Extractor;
pub use types::{Category, Coupon, ExtractionRequest, ExtractionResult};
