//! Text normalization for collection names, symbols and user queries.
//!
//! Both sides of every comparison go through the same functions, so
//! "Mad Lads", "mad_lads" and "MAD-LADS" all compare as `madlads`.

use deunicode::deunicode_char;
use regex::Regex;
use std::sync::LazyLock;

/// Compiled regex matching runs of anything that is not a lowercase ASCII letter or digit.
static RE_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex"));

/// Transliterate letters and digits to ASCII and lowercase them.
///
/// Every other character (punctuation, symbols, emoji) becomes a space, so
/// "™" or "🔥" never turn into words like `tm` or `fire`.
fn fold_alphanumerics(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            folded.push_str(deunicode_char(c).unwrap_or(""));
        } else {
            folded.push(' ');
        }
    }
    folded.to_lowercase()
}

/// Collapse text into a single comparison key.
///
/// Pipeline:
/// 1. Drop non-alphanumeric characters, transliterate the rest via deunicode
/// 2. Lowercase
/// 3. Strip everything outside `[a-z0-9]`, spaces included
pub fn normalize_key(text: &str) -> String {
    let folded = fold_alphanumerics(text);
    RE_NON_ALNUM.replace_all(&folded, "").into_owned()
}

/// Split text into normalized tokens, in order.
///
/// Whitespace and punctuation both delimit tokens; empty tokens are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let folded = fold_alphanumerics(text);
    RE_NON_ALNUM
        .split(&folded)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod tests;
