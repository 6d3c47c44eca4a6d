//! Channel owner hook-line extraction.
//!
//! Runs on the ORIGINAL text: the hook ("OLHA O COMBOOO!") is exactly
//! the kind of line the cleaner treats as footer noise, so it must be
//! captured before cleaning.

use std::sync::LazyLock;

use regex::Regex;

/// All-caps line ending in exclamation marks.
// TODO: accented caps ("IMPERDÍVEL!") fall outside A-Z and are missed.
static RE_CAPS_SHOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z\s!]+!+\s*$").unwrap());

/// Excitement emoji prefix + caps text + exclamation.
static RE_EMOJI_SHOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:🔥|😱|🤯|✨|👀|💥)+\s*[A-Z\s!]+!+\s*$").unwrap());

/// Product-emoji, price or coupon lines end the hook section.
static RE_SECTION_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:📺|👟|🎮|📱|⌨)|R\$\s*\d+|cupom:").unwrap());

/// Extract the owner's hook line from the first 3 non-empty lines.
pub fn extract_description(text: &str) -> Option<String> {
    for line in text.split('\n').filter(|l| !l.trim().is_empty()).take(3) {
        let trimmed = line.trim();

        if RE_CAPS_SHOUT.is_match(trimmed) || RE_EMOJI_SHOUT.is_match(trimmed) {
            return Some(trimmed.to_string());
        }

        if RE_SECTION_END.is_match(trimmed) {
            return None;
        }
    }

    None
}
