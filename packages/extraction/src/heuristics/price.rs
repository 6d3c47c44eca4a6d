//! Price extraction, in exact integer centavos.
//!
//! Two priority tiers. "por" marks the final/discounted price, so any
//! "por <amount>" match wins over generic "R$ <amount>" occurrences,
//! and when several candidates survive a tier the minimum is the
//! actual offer. Amounts near "cupom de"/"desconto de" or followed by
//! "OFF" are discount values, not sale prices, and are skipped.

use std::sync::LazyLock;

use regex::Regex;

static RE_POR_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bpor\s+(?:R\$\s*)?(\d+(?:[.,]\d+)*)").unwrap());

static RE_GENERIC_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)R\$\s*(\d+(?:[.,]\d+)*)").unwrap());

/// "cupom de " / "desconto de " immediately before an amount.
static RE_DISCOUNT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:cupom|desconto)\s+de\s*$").unwrap());

/// "OFF" immediately after an amount.
static RE_OFF_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*OFF\b").unwrap());

/// Extract the offer price in centavos, or `None`.
pub fn extract_price(text: &str) -> Option<i64> {
    // Tier 1: "por <amount>", the discounted price.
    let tier1: Vec<i64> = RE_POR_PRICE
        .captures_iter(text)
        .filter_map(|c| parse_cents(&c[1]))
        .collect();
    if let Some(min) = tier1.into_iter().min() {
        return Some(min);
    }

    // Tier 2: generic currency amounts, discounts excluded.
    RE_GENERIC_PRICE
        .captures_iter(text)
        .filter_map(|captures| {
            let amount = captures.get(1)?;
            let whole = captures.get(0)?;
            if RE_DISCOUNT_PREFIX.is_match(&text[..whole.start()]) {
                return None;
            }
            if RE_OFF_SUFFIX.is_match(&text[amount.end()..]) {
                return None;
            }
            parse_cents(amount.as_str())
        })
        .min()
}

/// Normalize a pt-BR amount string to centavos without going through
/// floating point. Dots are thousands separators; the first comma
/// starts the decimal part, rounded to the nearest cent.
fn parse_cents(raw: &str) -> Option<i64> {
    let no_dots = raw.replace('.', "");
    let (int_part, frac_part) = match no_dots.split_once(',') {
        Some((i, f)) => (i, f),
        None => (no_dots.as_str(), ""),
    };

    let reais: i64 = int_part.parse().ok()?;
    let digits: Vec<u32> = frac_part
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .collect();

    let mut centavos = match digits.len() {
        0 => 0,
        1 => i64::from(digits[0]) * 10,
        _ => i64::from(digits[0]) * 10 + i64::from(digits[1]),
    };
    if digits.len() > 2 && digits[2] >= 5 {
        centavos += 1;
    }

    let total = reais.checked_mul(100)?.checked_add(centavos)?;
    (total > 0).then_some(total)
}
