use quickswitch_core::catalog::{
    format_playlist_link, parse_rootlist, system_destinations, CandidateSource, Catalog,
    RefreshOutcome, ResolverError, SidebarLink, SidebarSource, StaticSource,
};
use quickswitch_core::model::Candidate;

const ROOTLIST: &str = r#"{
    "rows": [
        {"name": "My Chill Mix", "link": "spotify:user:alice:playlist:37i9dQZF1DX"},
        {"name": "Untitled folder", "type": "folder"},
        {"name": "Workout", "link": "spotify:playlist:5xyz"}
    ]
}"#;

#[test]
fn system_destinations_are_fixed() {
    let system = system_destinations();
    assert_eq!(system.len(), 9);
    assert_eq!(system[0], Candidate::new("Home", "spotify:app:home"));
    assert!(system
        .iter()
        .any(|c| c.title() == "Liked Songs" && c.destination_id() == "spotify:app:collection-songs"));
}

#[test]
fn formats_playlist_links_from_last_segment() {
    assert_eq!(
        format_playlist_link("spotify:user:alice:playlist:37i9dQZF1DX").as_deref(),
        Some("spotify:app:playlist:37i9dQZF1DX")
    );
    assert_eq!(format_playlist_link("spotify:playlist:"), None);
}

#[test]
fn parses_rootlist_rows_and_skips_incomplete_ones() {
    let playlists = parse_rootlist(ROOTLIST).unwrap();
    assert_eq!(
        playlists,
        vec![
            Candidate::new("My Chill Mix", "spotify:app:playlist:37i9dQZF1DX"),
            Candidate::new("Workout", "spotify:app:playlist:5xyz"),
        ]
    );
}

#[test]
fn malformed_rootlist_is_an_error() {
    assert!(matches!(
        parse_rootlist("<html>"),
        Err(ResolverError::Malformed(_))
    ));
}

#[test]
fn sidebar_source_skips_blank_links() {
    let source = SidebarSource::new(|| {
        vec![
            SidebarLink {
                text: " Discover Weekly ".into(),
                href: "spotify:app:playlist:dw".into(),
            },
            SidebarLink {
                text: "".into(),
                href: "spotify:app:playlist:ghost".into(),
            },
        ]
    });

    assert_eq!(
        source.candidates(),
        vec![Candidate::new("Discover Weekly", "spotify:app:playlist:dw")]
    );
}

#[test]
fn rebuild_starts_a_new_generation_with_live_entries() {
    let mut catalog = Catalog::default();
    let live = StaticSource::new(vec![Candidate::new("Sidebar", "spotify:app:playlist:s")]);

    let first = catalog.rebuild(None);
    assert_eq!(catalog.candidates().len(), 9);

    let second = catalog.rebuild(Some(&live));
    assert!(second.generation() > first.generation());
    assert_eq!(catalog.candidates().len(), 10);
    assert_eq!(catalog.candidates()[9].title(), "Sidebar");
}

#[test]
fn current_generation_response_is_merged() {
    let mut catalog = Catalog::default();
    let ticket = catalog.rebuild(None);

    let outcome = catalog.apply_rootlist(ticket, Ok(ROOTLIST.to_string()));

    assert_eq!(outcome, RefreshOutcome::Merged(2));
    assert_eq!(catalog.candidates().len(), 11);
}

#[test]
fn failed_fetch_keeps_system_destinations() {
    let mut catalog = Catalog::default();
    let ticket = catalog.rebuild(None);

    let failed = catalog.apply_rootlist(ticket, Err(ResolverError::Failed("timeout".into())));
    let malformed = catalog.apply_rootlist(ticket, Ok("{\"rows\": 7}".into()));

    assert_eq!(failed, RefreshOutcome::FellBack);
    assert_eq!(malformed, RefreshOutcome::FellBack);
    assert_eq!(catalog.candidates(), system_destinations().as_slice());
}

#[test]
fn earlier_generation_response_is_discarded() {
    let mut catalog = Catalog::default();
    let stale = catalog.rebuild(None);
    catalog.rebuild(None);

    let outcome = catalog.apply_rootlist(stale, Ok(ROOTLIST.to_string()));

    assert_eq!(outcome, RefreshOutcome::Stale);
    assert_eq!(catalog.candidates().len(), 9);
}
