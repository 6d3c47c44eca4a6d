//! Data model shared by both extraction strategies.
//!
//! Field names serialize in camelCase to match the wire format the
//! upstream bot consumes (`messageId`, `productKey`, ...).

use serde::{Deserialize, Serialize};

/// One extraction request: the raw promo message plus its origin.
///
/// Immutable input, owned by the caller for the duration of one
/// extraction call. Validation (non-empty text, positive message id)
/// happens at the HTTP boundary before the core sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    /// Raw message text, Telegram-style pt-BR marketing copy.
    pub text: String,

    /// Source chat/channel identifier.
    pub chat: String,

    /// Positive message id within the chat.
    pub message_id: i64,

    /// URLs found alongside the message, in original order.
    #[serde(default)]
    pub links: Vec<String>,
}

/// A coupon detected in (or returned for) a promo message.
///
/// Within one [`ExtractionResult`] no two coupons share a `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Uppercase alphanumeric code, 3-20 characters.
    pub code: String,

    /// Free-text discount, e.g. "15% OFF".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Coupon {
    /// Coupon with a code and nothing else, the common detection case.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            discount: None,
            description: None,
            expires_at: None,
            url: None,
        }
    }
}

/// Fixed product category set.
///
/// Only the remote strategy assigns these; the heuristics cannot make
/// the semantic call. Unknown strings from the model map to `None`
/// rather than failing the extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Eletronicos,
    Informatica,
    Games,
    Celulares,
    Casa,
    Moda,
    Esporte,
    Mercado,
    Beleza,
    Outros,
}

impl Category {
    /// Lenient parse used when mapping model output.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "eletronicos" | "eletrônicos" => Some(Self::Eletronicos),
            "informatica" | "informática" => Some(Self::Informatica),
            "games" => Some(Self::Games),
            "celulares" => Some(Self::Celulares),
            "casa" => Some(Self::Casa),
            "moda" => Some(Self::Moda),
            "esporte" => Some(Self::Esporte),
            "mercado" => Some(Self::Mercado),
            "beleza" => Some(Self::Beleza),
            "outros" => Some(Self::Outros),
            _ => None,
        }
    }
}

/// Normalized record produced by either strategy.
///
/// Produced fresh per call and never mutated after construction.
/// Absent fields are `None`, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Message text with promotional footers removed.
    pub text: String,

    /// Channel owner's hook line, e.g. "OLHA O COMBOOO!".
    pub description: Option<String>,

    /// Product name, specs included when present.
    pub product: Option<String>,

    /// Store or platform name.
    pub store: Option<String>,

    /// Final price as an exact integer count of centavos.
    pub price: Option<i64>,

    /// Detected coupons in detection order, codes unique.
    pub coupons: Vec<Coupon>,

    /// Normalized product slug; remote strategy only.
    pub product_key: Option<String>,

    /// Product category; remote strategy only.
    pub category: Option<Category>,
}
