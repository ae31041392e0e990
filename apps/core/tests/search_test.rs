use quickswitch_core::config::{Config, MatchPolicy};
use quickswitch_core::fuzzy::FuzzyMatcher;
use quickswitch_core::model::Candidate;
use quickswitch_core::search::{build_matcher, rank, SubstringMatcher, DEFAULT_RESULT_LIMIT};

fn titles(results: &[quickswitch_core::model::RankedResult]) -> Vec<&str> {
    results.iter().map(|r| r.candidate.title()).collect()
}

fn big_catalog() -> Vec<Candidate> {
    (0..40)
        .map(|i| Candidate::new(&format!("Mix {i}"), &format!("spotify:app:playlist:{i}")))
        .collect()
}

#[test]
fn chill_query_finds_the_chill_mix() {
    let catalog = vec![
        Candidate::new("Home", "spotify:app:home"),
        Candidate::new("Browse", "spotify:app:browse"),
        Candidate::new("My Chill Mix", "spotify:app:playlist:abc"),
    ];

    let results = rank(&FuzzyMatcher::default(), "chil", &catalog, &[], DEFAULT_RESULT_LIMIT);

    assert_eq!(titles(&results), vec!["My Chill Mix"]);
}

#[test]
fn results_are_capped_for_both_policies() {
    let catalog = big_catalog();

    let fuzzy = rank(&FuzzyMatcher::default(), "mix", &catalog, &[], DEFAULT_RESULT_LIMIT);
    let substring = rank(&SubstringMatcher, "mix", &catalog, &[], DEFAULT_RESULT_LIMIT);

    assert_eq!(fuzzy.len(), 10);
    assert_eq!(substring.len(), 10);
}

#[test]
fn blank_query_returns_recents_regardless_of_catalog() {
    let recents: Vec<Candidate> = (0..12)
        .map(|i| Candidate::new(&format!("Recent {i}"), &format!("spotify:app:playlist:r{i}")))
        .collect();

    let with_catalog = rank(&FuzzyMatcher::default(), "", &big_catalog(), &recents, 10);
    let without_catalog = rank(&FuzzyMatcher::default(), "   ", &[], &recents, 10);

    assert_eq!(with_catalog, without_catalog);
    assert_eq!(with_catalog.len(), 10);
    assert_eq!(with_catalog[0].candidate.title(), "Recent 0");
    assert_eq!(with_catalog[9].candidate.title(), "Recent 9");
}

#[test]
fn exact_title_outranks_equal_scoring_prefix_match() {
    let catalog = vec![
        Candidate::new("Home Mix", "spotify:app:playlist:home-mix"),
        Candidate::new("Home", "spotify:app:home"),
    ];

    let results = rank(&FuzzyMatcher::default(), "home", &catalog, &[], 10);

    assert_eq!(titles(&results), vec!["Home", "Home Mix"]);
    assert_eq!(results[0].score, 0.0);
}

#[test]
fn fuzzy_orders_best_score_first_and_keeps_catalog_order_on_ties() {
    let catalog = vec![
        Candidate::new("Deep Focus", "a"),
        Candidate::new("Focus Flow", "b"),
        Candidate::new("Focus Now", "c"),
    ];

    let results = rank(&FuzzyMatcher::default(), "focus", &catalog, &[], 10);

    assert_eq!(titles(&results), vec!["Focus Flow", "Focus Now", "Deep Focus"]);
}

#[test]
fn no_match_yields_empty_results() {
    let catalog = vec![Candidate::new("Home", "spotify:app:home")];
    assert!(rank(&FuzzyMatcher::default(), "zzzz", &catalog, &[], 10).is_empty());
    assert!(rank(&SubstringMatcher, "zzzz", &catalog, &[], 10).is_empty());
}

#[test]
fn matcher_follows_configured_policy() {
    let substring = build_matcher(&Config {
        match_policy: MatchPolicy::Substring,
        ..Default::default()
    });
    let fuzzy = build_matcher(&Config::default());

    assert_eq!(substring.name(), "substring");
    assert_eq!(fuzzy.name(), "fuzzy");

    let catalog = vec![Candidate::new("Podcasts", "spotify:app:collection:podcasts")];
    assert!(substring.rank("podcsts", &catalog).is_empty());
    assert_eq!(fuzzy.rank("podcsts", &catalog).len(), 1);
}
