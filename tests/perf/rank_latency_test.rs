use std::time::Instant;

use crate::fuzzy::FuzzyMatcher;
use crate::model::Candidate;
use crate::search::{rank, DEFAULT_RESULT_LIMIT};

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn fuzzy_rank_p95_under_50ms() {
    let mut catalog: Vec<Candidate> = (0..2_000)
        .map(|i| {
            Candidate::new(
                &format!("Playlist {i:04}"),
                &format!("spotify:app:playlist:{i:022}"),
            )
        })
        .collect();
    catalog.push(Candidate::new("My Chill Mix", "spotify:app:playlist:chill"));

    let matcher = FuzzyMatcher::default();
    for _ in 0..10 {
        let _ = rank(&matcher, "chil mx", &catalog, &[], DEFAULT_RESULT_LIMIT);
    }

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(20);
        for _ in 0..20 {
            let start = Instant::now();
            let results = rank(&matcher, "chil mx", &catalog, &[], DEFAULT_RESULT_LIMIT);
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
            assert_eq!(results[0].candidate.title(), "My Chill Mix");
        }
        batch_p95.push(p95_ms(&mut samples));
    }

    batch_p95.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_p95 = batch_p95[batch_p95.len() / 2];

    assert!(
        median_p95 <= 50.0,
        "median batch p95 too high: {median_p95:.3}ms (budget 50.0ms); batches={batch_p95:?}",
    );
}
