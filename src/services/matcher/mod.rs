pub mod fuzzy;
pub mod normalizer;

pub use fuzzy::{find_best_match, MatchCandidate, MatchType, DEFAULT_SIMILARITY_THRESHOLD};
