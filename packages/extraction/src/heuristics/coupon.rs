//! Coupon code validation and detection.
//!
//! Two independent passes over the cleaned text, unioned with
//! de-duplication by code:
//!
//! 1. Explicit "cupom" label. With a colon the code list can sit
//!    anywhere ("CUPOM: NIKE40"); without one the list must close the
//!    line, so prose like "CUPOM NIKE AINDA ATIVO" never turns the
//!    brand word into a code.
//! 2. Standalone ticket emoji at line start ("🎫 VGA11").
//!
//! Every candidate must pass [`is_valid_code`] on its own.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Coupon;

static RE_ALNUM_UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").unwrap());
static RE_ALL_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

/// Candidate codes after a colon, separated by `/`, `,` or "ou".
static RE_CUPOM_COLON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:cupom)\s*:\s*([A-Z0-9]{3,}(?:\s*(?:[/,]|(?i:\bou\b))\s*[A-Z0-9]{3,})*)")
        .unwrap()
});

/// Colon-less form, accepted only when the code list ends the line.
static RE_CUPOM_EOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\b(?i:cupom)\s+([A-Z0-9]{3,}(?:\s*(?:[/,]|(?i:\bou\b))\s*[A-Z0-9]{3,})*)\s*$")
        .unwrap()
});

/// Ticket emoji at line start, optional "cupom" label, one code.
static RE_STANDALONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:🎟️|🎟|🎫|💳)\s*(?:(?i:cupom)\s*:?\s*)?([A-Z0-9]{3,20})(?:\s|$)")
        .unwrap()
});

/// Splits a captured code list on `/`, `,` or the word "ou".
static RE_CODE_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[/,]\s*|\s+(?i:ou)\s+").unwrap());

/// Percentage discount phrase, e.g. "15% OFF".
static RE_PERCENT_OFF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,3}(?:[.,]\d+)?\s*%\s*OFF)\b").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Whether a candidate string looks like a real coupon code.
///
/// Length 3-20, strictly uppercase alphanumeric, and not a bare
/// number (those are phone/price fragments, not codes).
pub fn is_valid_code(code: &str) -> bool {
    let len = code.chars().count();
    if !(3..=20).contains(&len) {
        return false;
    }
    if !RE_ALNUM_UPPER.is_match(code) {
        return false;
    }
    !RE_ALL_DIGITS.is_match(code)
}

/// Detect coupon codes in a message.
///
/// Output order is detection order: all pass-1 matches, then pass-2,
/// duplicates dropped on second occurrence. When the text carries a
/// "N% OFF" phrase it is attached as `discount` on every coupon.
pub fn detect_coupons(text: &str) -> Vec<Coupon> {
    let mut coupons: Vec<Coupon> = Vec::new();

    // Pass 1 runs on whitespace-flattened text so a label and its
    // codes can straddle a line break. The colon-less variant keeps
    // line structure, its end-of-line anchor is the whole point.
    let flattened = RE_WHITESPACE.replace_all(text, " ");
    for captures in RE_CUPOM_COLON
        .captures_iter(&flattened)
        .chain(RE_CUPOM_EOL.captures_iter(text))
    {
        for candidate in RE_CODE_SEP.split(&captures[1]) {
            let code = candidate.trim();
            if is_valid_code(code) && !coupons.iter().any(|c| c.code == code) {
                coupons.push(Coupon::new(code));
            }
        }
    }

    // Pass 2: standalone emoji lines.
    for captures in RE_STANDALONE.captures_iter(text) {
        let code = captures[1].trim();
        if is_valid_code(code) && !coupons.iter().any(|c| c.code == code) {
            coupons.push(Coupon::new(code));
        }
    }

    if let Some(captures) = RE_PERCENT_OFF.captures(text) {
        let discount = captures[1].to_string();
        for coupon in &mut coupons {
            coupon.discount = Some(discount.clone());
        }
    }

    coupons
}
