//! Store / retailer extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Known stores and platforms, anchored at line start.
static RE_KNOWN_STORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^\s*(Amazon|Mercado Livre|Magalu|Magazine Luiza|Americanas|Shopee|AliExpress|Kabum|Pichau|Nike|Adidas|Netshoes)",
    )
    .unwrap()
});

/// Storefront emoji followed by a free-text store name.
static RE_STOREFRONT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"🏪\s*([^\n]+)").unwrap());

/// Extract the store name; known-store match first, then 🏪 capture.
pub fn extract_store(text: &str) -> Option<String> {
    RE_KNOWN_STORE
        .captures(text)
        .or_else(|| RE_STOREFRONT.captures(text))
        .map(|c| c[1].trim().to_string())
}
