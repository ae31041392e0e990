//! Approximate title matching.
//!
//! A query matches a title when some window of the title can be turned into the
//! query with few edits, close to the start of the title. The score combines both:
//! `errors / query_len + match_start / distance`, so an exact prefix scores 0.0 and
//! anything above the threshold is rejected.

use crate::model::{normalize_for_search, Candidate, RankedResult};
use crate::search::Matcher;

pub const DEFAULT_THRESHOLD: f64 = 0.4;
pub const DEFAULT_DISTANCE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
    distance: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            distance: DEFAULT_DISTANCE,
        }
    }

    pub fn with_distance(mut self, distance: usize) -> Self {
        self.distance = distance.max(1);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Both inputs must already be normalized. Returns `None` above the threshold.
    pub fn score(&self, normalized_query: &str, normalized_title: &str) -> Option<f64> {
        let query: Vec<char> = normalized_query.chars().collect();
        if query.is_empty() {
            return None;
        }
        let title: Vec<char> = normalized_title.chars().collect();

        let score = best_alignment_score(&query, &title, self.distance);
        (score <= self.threshold).then_some(score)
    }
}

impl Matcher for FuzzyMatcher {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    fn rank(&self, query: &str, candidates: &[Candidate]) -> Vec<RankedResult> {
        let normalized_query = normalize_for_search(query);
        if normalized_query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, bool, usize, &Candidate)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                let title = candidate.normalized_title();
                self.score(&normalized_query, title)
                    .map(|score| (score, title == normalized_query, index, candidate))
            })
            .collect();

        scored.sort_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then_with(|| b.1.cmp(&a.1))
                .then_with(|| a.2.cmp(&b.2))
        });

        scored
            .into_iter()
            .map(|(score, _, _, candidate)| RankedResult {
                candidate: candidate.clone(),
                score,
            })
            .collect()
    }
}

// Approximate substring edit distance: leading title characters are free, each
// cell carries (errors, start of the aligned window).
fn best_alignment_score(query: &[char], title: &[char], distance: usize) -> f64 {
    let m = query.len();
    let mut prev: Vec<(usize, usize)> = (0..=title.len()).map(|j| (0, j)).collect();

    for i in 1..=m {
        let mut row = Vec::with_capacity(title.len() + 1);
        row.push((i, 0));
        for j in 1..=title.len() {
            let cost = usize::from(query[i - 1] != title[j - 1]);
            let diagonal = (prev[j - 1].0 + cost, prev[j - 1].1);
            let skip_query = (prev[j].0 + 1, prev[j].1);
            let skip_title = (row[j - 1].0 + 1, row[j - 1].1);
            row.push(diagonal.min(skip_query).min(skip_title));
        }
        prev = row;
    }

    prev.iter()
        .map(|&(errors, start)| errors as f64 / m as f64 + start as f64 / distance as f64)
        .fold(f64::INFINITY, f64::min)
}
