use crate::config::{Config, MatchPolicy};
use crate::fuzzy::FuzzyMatcher;
use crate::model::{normalize_for_search, Candidate, RankedResult};

pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Ranks a catalog against a non-empty query. Implementations return every
/// accepted candidate, best first; callers apply the result cap.
pub trait Matcher {
    fn name(&self) -> &'static str;
    fn rank(&self, query: &str, candidates: &[Candidate]) -> Vec<RankedResult>;
}

/// Case-insensitive containment in catalog order.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringMatcher;

impl Matcher for SubstringMatcher {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn rank(&self, query: &str, candidates: &[Candidate]) -> Vec<RankedResult> {
        let normalized_query = normalize_for_search(query);
        if normalized_query.is_empty() {
            return Vec::new();
        }

        candidates
            .iter()
            .filter(|candidate| candidate.normalized_title().contains(&normalized_query))
            .cloned()
            .map(RankedResult::unscored)
            .collect()
    }
}

pub fn build_matcher(cfg: &Config) -> Box<dyn Matcher> {
    match cfg.match_policy {
        MatchPolicy::Fuzzy => Box::new(
            FuzzyMatcher::new(cfg.fuzzy_threshold).with_distance(cfg.fuzzy_distance),
        ),
        MatchPolicy::Substring => Box::new(SubstringMatcher),
    }
}

/// Results for the palette: the recent list for a blank query, ranked catalog
/// matches otherwise. Never more than `limit` entries.
pub fn rank(
    matcher: &dyn Matcher,
    query: &str,
    candidates: &[Candidate],
    recents: &[Candidate],
    limit: usize,
) -> Vec<RankedResult> {
    if limit == 0 {
        return Vec::new();
    }

    if query.trim().is_empty() {
        return recents
            .iter()
            .take(limit)
            .cloned()
            .map(RankedResult::unscored)
            .collect();
    }

    let mut ranked = matcher.rank(query, candidates);
    ranked.truncate(limit);
    ranked
}
