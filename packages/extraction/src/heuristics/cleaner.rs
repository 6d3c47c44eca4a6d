//! Promotional footer removal.
//!
//! Promo channels append call-to-action boilerplate after the offer:
//! group-invite lines, channel banners, bare "Telegram:" labels.
//! Once the first footer line appears nothing useful follows, so the
//! scan latches and drops the rest of the message.

use std::sync::LazyLock;

use regex::Regex;

static RE_GROUP_CTA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)💰\s*entre\s+no\s+nosso\s+grupo").unwrap());

static RE_CONTACT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(telegram|whatsapp):\s*$").unwrap());

static RE_CHANNEL_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:📱|🎯|💰|🔥|✨)+\s*[A-Z\s]+(?:📱|🎯|💰|🔥|✨)+\s*$").unwrap()
});

static RE_INVITE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://(t\.me|bit\.ly|chat\.whatsapp\.com)").unwrap());

static RE_BUY_HERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^compre\s+aqui:\s*$").unwrap());

static RE_CAPS_SHOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z\s!]+!+\s*$").unwrap());

/// Strip trailing promotional boilerplate from a message.
///
/// Lines are scanned top to bottom; the first footer line sets a
/// permanent latch and every subsequent line is dropped. Invite links
/// only count as footer once the latch is set, so an offer link in
/// the body survives. Without any footer the text comes back intact,
/// minus trailing whitespace.
pub fn clean(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut found_footer = false;

    for line in text.split('\n') {
        let trimmed = line.trim();

        let is_footer = RE_GROUP_CTA.is_match(trimmed)
            || RE_CONTACT_LABEL.is_match(trimmed)
            || RE_CHANNEL_BANNER.is_match(trimmed)
            || (found_footer && RE_INVITE_LINK.is_match(trimmed))
            || RE_BUY_HERE.is_match(trimmed)
            || RE_CAPS_SHOUT.is_match(trimmed);

        if is_footer {
            found_footer = true;
            continue;
        }

        if !found_footer {
            kept.push(line);
        }
    }

    kept.join("\n").trim_end().to_string()
}
