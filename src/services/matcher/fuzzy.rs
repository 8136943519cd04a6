//! Fuzzy collection matcher.
//!
//! Resolves free-form text to one catalog entry by running an escalating
//! pipeline: Full Name → Symbol → Prefix → Token.
//!
//! A single running best (index, distance, strategy) is shared by all
//! strategies and only replaced by a strictly smaller distance, so on equal
//! distance the earlier strategy wins. Prefix and Token only run while the
//! best is missing or weaker than distance 1.

use serde::{Deserialize, Serialize};

use super::normalizer::{normalize_key, tokenize};
use crate::services::catalog::models::{Catalog, Collection};

pub const DEFAULT_SIMILARITY_THRESHOLD: usize = 3;

/// Minimum normalized input length for the prefix strategy.
const MIN_PREFIX_INPUT_LEN: usize = 3;
const PREFIX_MAX_DISTANCE: usize = 1;
/// Per-token and cumulative ceiling for the token strategy.
const TOKEN_MAX_DISTANCE: usize = 2;
/// Added in place of the distance for a user token with no acceptable match.
const TOKEN_MISS_PENALTY: usize = 3;
/// Best distance at or below which the later strategies are skipped.
const ESCALATION_DISTANCE: usize = 1;

/// Which strategy produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    FullName,
    Symbol,
    PrefixName,
    TokenMatch,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::FullName => write!(f, "full_name"),
            MatchType::Symbol => write!(f, "symbol"),
            MatchType::PrefixName => write!(f, "prefix_name"),
            MatchType::TokenMatch => write!(f, "token_match"),
        }
    }
}

/// The winning collection with its edit distance and strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub collection: Collection,
    pub distance: usize,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BestMatch {
    index: usize,
    distance: usize,
    match_type: MatchType,
}

/// Running best shared across strategies.
#[derive(Debug, Default)]
struct BestTracker {
    best: Option<BestMatch>,
}

impl BestTracker {
    /// Record the candidate if it strictly improves on the current best.
    fn offer(&mut self, index: usize, distance: usize, match_type: MatchType) {
        if self.best.is_none_or(|b| distance < b.distance) {
            self.best = Some(BestMatch {
                index,
                distance,
                match_type,
            });
        }
    }

    fn needs_escalation(&self) -> bool {
        self.best.is_none_or(|b| b.distance > ESCALATION_DISTANCE)
    }
}

/// Find the best catalog entry for `user_input`.
///
/// Returns `None` for an empty catalog, an input with no alphanumeric
/// characters, or when no strategy produces an acceptable candidate.
pub fn find_best_match(
    user_input: &str,
    catalog: &Catalog,
    similarity_threshold: usize,
) -> Option<MatchCandidate> {
    if catalog.is_empty() {
        return None;
    }

    let input_key = normalize_key(user_input);
    if input_key.is_empty() {
        return None;
    }

    let mut tracker = BestTracker::default();

    // 1: Full Name
    if let Some((index, distance)) = full_name_match(&input_key, catalog) {
        if distance <= similarity_threshold {
            tracker.offer(index, distance, MatchType::FullName);
        }
    }

    // 2: Symbol
    if let Some((index, distance)) = symbol_match(&input_key, catalog) {
        if distance <= similarity_threshold {
            tracker.offer(index, distance, MatchType::Symbol);
        }
    }

    // 3: Prefix
    if tracker.needs_escalation() {
        if let Some((index, distance)) = prefix_match(&input_key, catalog) {
            tracker.offer(index, distance, MatchType::PrefixName);
        }
    }

    // 4: Token
    if tracker.needs_escalation() {
        if let Some((index, distance)) = token_match(&tokenize(user_input), catalog) {
            tracker.offer(index, distance, MatchType::TokenMatch);
        }
    }

    let best = tracker.best?;
    let collection = catalog.get(best.index)?.clone();
    log::debug!(
        "Matched \"{}\" → {} ({}, distance {})",
        user_input,
        collection.symbol,
        best.match_type,
        best.distance
    );

    Some(MatchCandidate {
        collection,
        distance: best.distance,
        match_type: best.match_type,
    })
}

/// Closest normalized name. Returns `(index, distance)`; first wins on ties.
pub fn full_name_match(input_key: &str, catalog: &Catalog) -> Option<(usize, usize)> {
    closest(
        input_key,
        catalog.entries().map(|(i, _, keys)| (i, keys.name_key.as_str())),
    )
}

/// Closest normalized symbol. Returns `(index, distance)`; first wins on ties.
pub fn symbol_match(input_key: &str, catalog: &Catalog) -> Option<(usize, usize)> {
    closest(
        input_key,
        catalog.entries().map(|(i, _, keys)| (i, keys.symbol_key.as_str())),
    )
}

/// Names that start with the input, scored on the equal-length prefix.
///
/// Disabled for inputs shorter than three characters.
pub fn prefix_match(input_key: &str, catalog: &Catalog) -> Option<(usize, usize)> {
    let input_len = input_key.chars().count();
    if input_len < MIN_PREFIX_INPUT_LEN {
        return None;
    }

    let mut best: Option<(usize, usize)> = None;
    for (index, _, keys) in catalog.entries() {
        if !keys.name_key.starts_with(input_key) {
            continue;
        }

        let prefix: String = keys.name_key.chars().take(input_len).collect();
        let distance = strsim::levenshtein(input_key, &prefix);
        if distance <= PREFIX_MAX_DISTANCE && best.is_none_or(|(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }

    best
}

/// Every user token must find a name token within distance 2; the summed
/// distance must also stay within 2.
pub fn token_match(user_tokens: &[String], catalog: &Catalog) -> Option<(usize, usize)> {
    if user_tokens.is_empty() {
        return None;
    }

    let mut best: Option<(usize, usize)> = None;
    for (index, _, keys) in catalog.entries() {
        if keys.name_tokens.is_empty() {
            continue;
        }

        let mut total = 0;
        let mut all_matched = true;
        for user_token in user_tokens {
            let nearest = keys
                .name_tokens
                .iter()
                .map(|name_token| strsim::levenshtein(user_token, name_token))
                .min()
                .unwrap_or(usize::MAX);

            if nearest <= TOKEN_MAX_DISTANCE {
                total += nearest;
            } else {
                total += TOKEN_MISS_PENALTY;
                all_matched = false;
            }
        }

        if all_matched && total <= TOKEN_MAX_DISTANCE && best.is_none_or(|(_, d)| total < d) {
            best = Some((index, total));
        }
    }

    best
}

/// Linear scan for the key nearest to `target` by Levenshtein distance.
fn closest<'a>(
    target: &str,
    keys: impl Iterator<Item = (usize, &'a str)>,
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (index, key) in keys {
        let distance = strsim::levenshtein(target, key);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((index, distance));
            if distance == 0 {
                break;
            }
        }
    }
    best
}

#[cfg(test)]
#[path = "tests/fuzzy_tests.rs"]
mod tests;
