//! Product name extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Lines that are clearly not product names.
static RE_SKIP_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(cupom|código|desconto|promoção|oferta)").unwrap());

static RE_SKIP_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(R\$|por\s+R\$)").unwrap());

static RE_SKIP_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());

static RE_SKIP_MARKER_EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[🎫🎟💳🔥⚡✨🎁🛒📢]").unwrap());

static RE_EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{1F300}-\x{1F9FF}]").unwrap());

static RE_LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-•*]\s*").unwrap());

/// Extract the product name from the first plausible line.
///
/// Scans non-empty lines in order, skipping coupon/price/link/marker
/// lines; the first survivor is stripped of emoji and list markers
/// and accepted when the remainder is 6-199 characters long.
pub fn extract_product(text: &str) -> Option<String> {
    for line in text.split('\n').filter(|l| !l.trim().is_empty()) {
        let trimmed = line.trim();

        if RE_SKIP_LABEL.is_match(trimmed)
            || RE_SKIP_PRICE.is_match(trimmed)
            || RE_SKIP_LINK.is_match(trimmed)
            || RE_SKIP_MARKER_EMOJI.is_match(trimmed)
        {
            continue;
        }

        let no_emoji = RE_EMOJI.replace_all(trimmed, "");
        let cleaned = RE_LIST_MARKER.replace(&no_emoji, "").trim().to_string();

        let len = cleaned.chars().count();
        if len > 5 && len < 200 {
            return Some(cleaned);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_meaningful_line_wins() {
        let text = "Tênis Nike Air Max\nR$ 287";
        assert_eq!(extract_product(text).as_deref(), Some("Tênis Nike Air Max"));
    }

    #[test]
    fn skips_coupon_and_price_lines() {
        let text = "CUPOM NIKE AINDA ATIVO\n👟 Tênis Nike Air Max Nuaxis\npor 287";
        assert_eq!(
            extract_product(text).as_deref(),
            Some("Tênis Nike Air Max Nuaxis")
        );
    }

    #[test]
    fn skips_links_and_list_markers() {
        let text = "https://loja.example/item\n- Notebook Acer Aspire GO 15";
        assert_eq!(
            extract_product(text).as_deref(),
            Some("Notebook Acer Aspire GO 15")
        );
    }

    #[test]
    fn too_short_lines_rejected() {
        assert_eq!(extract_product("Mouse\n🔥 OFERTA"), None);
    }

    #[test]
    fn empty_text_is_none() {
        assert_eq!(extract_product(""), None);
        assert_eq!(extract_product("\n\n"), None);
    }
}
