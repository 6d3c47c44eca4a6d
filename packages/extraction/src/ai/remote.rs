//! Remote model-backed extraction strategy.
//!
//! One chat-completions exchange per attempt: system prompt + the raw
//! message as the user turn, JSON reply requested. The whole call is
//! wrapped by the retry policy; the per-request timeout surfaces as a
//! retryable 408, a bare network failure as the status-0 surrogate.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ai::prompt::EXTRACTION_SYSTEM_PROMPT;
use crate::error::{ExtractionError, Result};
use crate::retry::{self, RetryPolicy};
use crate::traits::Extractor;
use crate::types::{Category, Coupon, ExtractionRequest, ExtractionResult};

/// Default chat-completions endpoint.
const DEFAULT_BASE_URL: &str = "https://routellm.abacus.ai/v1/chat/completions";

/// Default hard timeout for one attempt.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote provider configuration, captured once at construction.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Provider label for logging ("abacus", "openai", ...).
    pub provider: String,
    pub api_key: SecretString,
    pub model: String,
    /// Full chat-completions URL.
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl AiConfig {
    pub fn new(provider: impl Into<String>, api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: retry::STANDARD,
        }
    }

    /// Set a custom endpoint (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Model-backed implementation of [`Extractor`].
#[derive(Debug, Clone)]
pub struct AiExtractor {
    client: Client,
    config: AiConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Raw record shape the model answers with, before transformation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelRecord {
    text: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    product: Option<String>,
    #[serde(default)]
    store: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    coupons: Vec<ModelCoupon>,
    #[serde(default)]
    product_key: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelCoupon {
    code: String,
    // The prompt calls this field "information"; older replies used
    // "discount". Accept both.
    #[serde(default, alias = "information")]
    discount: Option<String>,
}

impl AiExtractor {
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// One attempt: call the endpoint, unwrap the envelope, parse the
    /// textual JSON reply, map it onto the common record shape.
    async fn extract_once(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        let payload = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: EXTRACTION_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &request.text,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(self.config.api_key.expose_secret())
            .timeout(self.config.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractionError::Api {
                        status: 408,
                        message: format!("request timeout after {:?}", self.config.timeout),
                    }
                } else {
                    ExtractionError::Api {
                        status: 0,
                        message: format!("network error: {e}"),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api {
                status: status.as_u16(),
                message: format!("model endpoint returned {status}: {body}"),
            });
        }

        let envelope: ChatResponse = response.json().await.map_err(|e| ExtractionError::Api {
            status: 0,
            message: format!("invalid response envelope: {e}"),
        })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ExtractionError::Api {
                status: 500,
                message: "no content in model response".to_string(),
            })?;

        let record = parse_reply(&content)?;
        Ok(transform(record, &request.text))
    }
}

#[async_trait::async_trait]
impl Extractor for AiExtractor {
    fn name(&self) -> &str {
        &self.config.provider
    }

    fn is_configured(&self) -> bool {
        !self.config.provider.is_empty()
            && !self.config.api_key.expose_secret().is_empty()
            && !self.config.model.is_empty()
            && !self.config.base_url.is_empty()
    }

    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        retry::run_with_retry(&self.config.retry, || self.extract_once(request)).await
    }
}

/// Parse the model's textual reply into the raw record.
///
/// Locates the JSON in order of preference: fenced ```json block,
/// first brace-balanced substring, the raw payload. A missing `text`
/// field means the model ignored the schema.
fn parse_reply(content: &str) -> Result<ModelRecord> {
    let json = fenced_json(content)
        .or_else(|| balanced_json(content))
        .unwrap_or(content);

    let record: ModelRecord = serde_json::from_str(json)
        .map_err(|e| ExtractionError::Parsing(format!("invalid JSON in model reply: {e}")))?;

    if record.text.is_none() {
        return Err(ExtractionError::Parsing(
            "missing \"text\" field in model reply".to_string(),
        ));
    }
    Ok(record)
}

/// Contents of the first ```json fenced block, if any.
fn fenced_json(content: &str) -> Option<&str> {
    let start = content.find("```json")? + "```json".len();
    let rest = &content[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// First brace-balanced substring, string-literal aware.
fn balanced_json(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in content[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Map the raw model record onto the shared result shape.
///
/// `text` falls back to the original request text when the model
/// omitted or emptied it; duplicate coupon codes are dropped to keep
/// the result invariant; unknown categories map to `None`. Everything
/// else is kept exactly as returned.
fn transform(record: ModelRecord, original_text: &str) -> ExtractionResult {
    let text = match record.text {
        Some(t) if !t.is_empty() => t,
        _ => original_text.to_string(),
    };

    let mut coupons: Vec<Coupon> = Vec::with_capacity(record.coupons.len());
    for c in record.coupons {
        if !coupons.iter().any(|seen| seen.code == c.code) {
            coupons.push(Coupon {
                code: c.code,
                discount: c.discount,
                description: None,
                expires_at: None,
                url: None,
            });
        }
    }

    ExtractionResult {
        text,
        description: record.description,
        product: record.product,
        store: record.store,
        price: record.price.map(|p| p.round() as i64),
        coupons,
        product_key: record.product_key,
        category: record.category.as_deref().and_then(Category::parse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const REPLY: &str = r#"{
        "text": "🔥 Monitor AOC 24\" 180Hz",
        "description": "Monitor bom.",
        "product": "Monitor AOC 24\" 180Hz",
        "store": "Mercado Livre",
        "price": 59840,
        "coupons": [
            {"code": "MELIPROMOAQUI", "information": null},
            {"code": "VALEPROMO", "information": "frete grátis"}
        ],
        "productKey": "monitor-aoc-24-180hz",
        "category": "informatica"
    }"#;

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
        }
    }

    fn extractor(base_url: &str) -> AiExtractor {
        let config = AiConfig::new("abacus", SecretString::from("test-key"), "claude-3-5-sonnet")
            .with_base_url(format!("{base_url}/v1/chat/completions"))
            .with_timeout(Duration::from_millis(250))
            .with_retry(fast_retry());
        AiExtractor::new(config)
    }

    fn request() -> ExtractionRequest {
        ExtractionRequest {
            text: "🔥 Monitor AOC 24\" 180Hz\nDE 799 | POR 598,40".to_string(),
            chat: "hardmob_promos".to_string(),
            message_id: 42,
            links: vec![],
        }
    }

    fn envelope(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })
    }

    #[test]
    fn parse_reply_plain_json() {
        let record = parse_reply(REPLY).unwrap();
        assert_eq!(record.product_key.as_deref(), Some("monitor-aoc-24-180hz"));
        assert_eq!(record.coupons.len(), 2);
        assert_eq!(record.coupons[1].discount.as_deref(), Some("frete grátis"));
    }

    #[test]
    fn parse_reply_fenced_block() {
        let content = format!("Here you go:\n```json\n{REPLY}\n```\nanything else");
        let record = parse_reply(&content).unwrap();
        assert_eq!(record.price, Some(59840.0));
    }

    #[test]
    fn parse_reply_brace_balanced_prose() {
        let content = format!("Sure! The extraction is {REPLY}, hope that helps.");
        let record = parse_reply(&content).unwrap();
        assert_eq!(record.store.as_deref(), Some("Mercado Livre"));
    }

    #[test]
    fn parse_reply_missing_text_is_parsing_error() {
        let err = parse_reply(r#"{"product": "Monitor"}"#).unwrap_err();
        assert!(matches!(err, ExtractionError::Parsing(_)));
    }

    #[test]
    fn parse_reply_garbage_is_parsing_error() {
        let err = parse_reply("desculpa, não consegui").unwrap_err();
        assert!(matches!(err, ExtractionError::Parsing(_)));
    }

    #[test]
    fn transform_defaults_text_and_dedupes() {
        let record = ModelRecord {
            text: Some(String::new()),
            description: None,
            product: None,
            store: None,
            price: Some(28700.0),
            coupons: vec![
                ModelCoupon {
                    code: "NIKE40".into(),
                    discount: None,
                },
                ModelCoupon {
                    code: "NIKE40".into(),
                    discount: Some("dup".into()),
                },
            ],
            product_key: None,
            category: Some("roupas de cama".into()),
        };

        let result = transform(record, "texto original");
        assert_eq!(result.text, "texto original");
        assert_eq!(result.coupons.len(), 1);
        assert_eq!(result.price, Some(28700));
        // Unknown category degrades to None, never an error
        assert!(result.category.is_none());
    }

    #[tokio::test]
    async fn extract_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(REPLY)))
            .expect(1)
            .mount(&server)
            .await;

        let result = extractor(&server.uri()).extract(&request()).await.unwrap();
        assert_eq!(result.price, Some(59840));
        assert_eq!(result.category, Some(Category::Informatica));
        assert_eq!(result.coupons[0].code, "MELIPROMOAQUI");
    }

    #[tokio::test]
    async fn server_errors_are_retried_then_succeed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(REPLY)))
            .mount(&server)
            .await;

        let result = extractor(&server.uri()).extract(&request()).await.unwrap();
        assert_eq!(result.store.as_deref(), Some("Mercado Livre"));
    }

    #[tokio::test]
    async fn client_error_fails_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let err = extractor(&server.uri()).extract(&request()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn exhausted_retries_rethrow_last_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let err = extractor(&server.uri()).extract(&request()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn timeout_maps_to_408() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(envelope(REPLY))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = extractor(&server.uri()).extract(&request()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Api { status: 408, .. }));
    }

    #[tokio::test]
    async fn missing_content_is_api_500_surrogate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let err = extractor(&server.uri()).extract(&request()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Api { status: 500, .. }));
    }

    #[test]
    fn unconfigured_without_key() {
        let config = AiConfig::new("abacus", SecretString::from(""), "claude-3-5-sonnet");
        assert!(!AiExtractor::new(config).is_configured());
    }
}
