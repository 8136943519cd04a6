//! Natural-language query parsing for the agent front end.
//!
//! Pulls an intent and a raw collection name out of phrases such as
//! "floor price of mad lads" or "stats for okay bears". The name is left
//! loose on purpose; the resolver does the fuzzy work.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static RE_FLOOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:floor price of|floor for|price of)(.+)").expect("Invalid regex")
});

static RE_STATS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:stats for|statistics for|get stats for)(.+)").expect("Invalid regex")
});

static RE_LOOKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:show me|find|get|lookup|search for|search)(.+)").expect("Invalid regex")
});

/// Filler words dropped from the extracted collection name.
static RE_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:collection|nft|project|series|please)\b").expect("Invalid regex")
});

static RE_MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid regex"));

/// Confidence when the intent is stated explicitly.
const EXPLICIT_CONFIDENCE: f32 = 0.7;
/// Confidence for "find X" style lookups where stats are assumed.
const LOOKUP_CONFIDENCE: f32 = 0.5;
/// Confidence when the whole input is taken as a collection name.
const BARE_NAME_CONFIDENCE: f32 = 0.4;

const BARE_NAME_MIN_CHARS: usize = 3;
const BARE_NAME_MAX_CHARS: usize = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    FloorPrice,
    CollectionStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub intent: Option<QueryIntent>,
    pub confidence: f32,
    pub collection_name: Option<String>,
}

impl ParsedQuery {
    fn unknown() -> Self {
        Self {
            intent: None,
            confidence: EXPLICIT_CONFIDENCE,
            collection_name: None,
        }
    }
}

/// Parse a user utterance into intent and collection name.
///
/// Rules are tried in order: floor price, stats, lookup verbs, then a bare
/// short phrase. Explicit phrases are matched on the lowercased text; a bare
/// phrase keeps its original casing.
pub fn parse_query(text: &str) -> ParsedQuery {
    let lower = text.to_lowercase();

    let (intent, confidence, raw_name) = if let Some(rest) = capture(&RE_FLOOR, &lower) {
        (QueryIntent::FloorPrice, EXPLICIT_CONFIDENCE, rest)
    } else if let Some(rest) = capture(&RE_STATS, &lower) {
        (QueryIntent::CollectionStats, EXPLICIT_CONFIDENCE, rest)
    } else if let Some(rest) = capture(&RE_LOOKUP, &lower) {
        (QueryIntent::CollectionStats, LOOKUP_CONFIDENCE, rest)
    } else if (BARE_NAME_MIN_CHARS..=BARE_NAME_MAX_CHARS).contains(&lower.chars().count()) {
        (QueryIntent::CollectionStats, BARE_NAME_CONFIDENCE, text.trim())
    } else {
        return ParsedQuery::unknown();
    };

    let name = clean_collection_name(raw_name);
    ParsedQuery {
        intent: Some(intent),
        confidence,
        collection_name: (!name.is_empty()).then_some(name),
    }
}

/// Strip filler words and collapse the gaps they leave.
pub fn clean_collection_name(raw: &str) -> String {
    let stripped = RE_FILLER.replace_all(raw.trim(), "");
    RE_MULTI_SPACE
        .replace_all(stripped.trim(), " ")
        .into_owned()
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
