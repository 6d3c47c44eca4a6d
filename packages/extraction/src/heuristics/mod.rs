//! Deterministic regex-based extraction.
//!
//! Each heuristic is an independent pure function over a string so
//! price, coupon and product logic stay testable in isolation;
//! [`HeuristicExtractor`] composes them into the baseline strategy.
//! The whole pipeline is total: absence of a field yields `None`,
//! never an error.

pub mod cleaner;
pub mod coupon;
pub mod description;
pub mod price;
pub mod product;
pub mod store;

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::Extractor;
use crate::types::{ExtractionRequest, ExtractionResult};

/// The deterministic extraction pipeline.
///
/// Stateless and reentrant; safe to share across concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run the pipeline synchronously. Never fails.
    ///
    /// The description runs on the raw text (the hook line is footer-
    /// shaped), everything else on the cleaned text. `product_key`
    /// and `category` need semantic judgment the heuristics cannot
    /// make and stay `None`.
    pub fn run(&self, request: &ExtractionRequest) -> ExtractionResult {
        let description = description::extract_description(&request.text);
        let cleaned = cleaner::clean(&request.text);

        let coupons = coupon::detect_coupons(&cleaned);
        let price = price::extract_price(&cleaned);
        let product = product::extract_product(&cleaned);
        let store = store::extract_store(&cleaned);

        ExtractionResult {
            text: cleaned,
            description,
            product,
            store,
            price,
            coupons,
            product_key: None,
            category: None,
        }
    }
}

#[async_trait]
impl Extractor for HeuristicExtractor {
    fn name(&self) -> &str {
        "regex"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        Ok(self.run(request))
    }
}
