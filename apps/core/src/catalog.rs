use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::Candidate;

pub const PLAYLIST_APP_PREFIX: &str = "spotify:app:playlist:";

const SYSTEM_DESTINATIONS: [(&str, &str); 9] = [
    ("Home", "spotify:app:home"),
    ("Browse", "spotify:app:browse"),
    ("Radio", "spotify:app:radio-hub"),
    ("Made For You", "spotify:app:made-for-you"),
    ("Recently Played", "spotify:app:recently-played"),
    ("Liked Songs", "spotify:app:collection-songs"),
    ("Albums", "spotify:app:collection:albums"),
    ("Artists", "spotify:app:collection:artists"),
    ("Podcasts", "spotify:app:collection:podcasts"),
];

pub fn system_destinations() -> Vec<Candidate> {
    SYSTEM_DESTINATIONS
        .iter()
        .map(|(title, id)| Candidate::new(title, id))
        .collect()
}

/// Synchronous candidates supplied by the page, e.g. the rendered sidebar.
pub trait CandidateSource {
    fn candidates(&self) -> Vec<Candidate>;
}

#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    entries: Vec<Candidate>,
}

impl StaticSource {
    pub fn new(entries: Vec<Candidate>) -> Self {
        Self { entries }
    }
}

impl CandidateSource for StaticSource {
    fn candidates(&self) -> Vec<Candidate> {
        self.entries.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLink {
    pub text: String,
    pub href: String,
}

/// Reads the sidebar through a host callback each time the catalog is rebuilt.
pub struct SidebarSource<F> {
    read_links: F,
}

impl<F> SidebarSource<F>
where
    F: Fn() -> Vec<SidebarLink>,
{
    pub fn new(read_links: F) -> Self {
        Self { read_links }
    }
}

impl<F> CandidateSource for SidebarSource<F>
where
    F: Fn() -> Vec<SidebarLink>,
{
    fn candidates(&self) -> Vec<Candidate> {
        (self.read_links)()
            .into_iter()
            .filter_map(|link| {
                let title = link.text.trim();
                let href = link.href.trim();
                if title.is_empty() || href.is_empty() {
                    return None;
                }
                Some(Candidate::new(title, href))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    #[error("resolver request failed: {0}")]
    Failed(String),
    #[error("malformed playlist root list: {0}")]
    Malformed(String),
}

/// Identifies the palette session that issued a playlist request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Host bridge for the asynchronous playlist root-list request. The host answers
/// by passing the ticket and the raw body back to the controller.
pub trait PlaylistResolver {
    fn request_rootlist(&mut self, ticket: RefreshTicket);
}

#[derive(Default)]
pub struct MockPlaylistResolver {
    requests: Rc<RefCell<Vec<RefreshTicket>>>,
}

impl MockPlaylistResolver {
    pub fn requests(&self) -> Rc<RefCell<Vec<RefreshTicket>>> {
        Rc::clone(&self.requests)
    }
}

impl PlaylistResolver for MockPlaylistResolver {
    fn request_rootlist(&mut self, ticket: RefreshTicket) {
        self.requests.borrow_mut().push(ticket);
    }
}

#[derive(Debug, Deserialize)]
struct RootList {
    #[serde(default)]
    rows: Vec<RootListRow>,
}

#[derive(Debug, Deserialize)]
struct RootListRow {
    name: Option<String>,
    link: Option<String>,
}

pub fn format_playlist_link(link: &str) -> Option<String> {
    let id = link.trim().rsplit(':').next()?.trim();
    if id.is_empty() {
        return None;
    }
    Some(format!("{PLAYLIST_APP_PREFIX}{id}"))
}

/// Rows without a name or a usable link are skipped.
pub fn parse_rootlist(body: &str) -> Result<Vec<Candidate>, ResolverError> {
    let root: RootList =
        serde_json::from_str(body).map_err(|e| ResolverError::Malformed(e.to_string()))?;

    Ok(root
        .rows
        .into_iter()
        .filter_map(|row| {
            let name = row.name?;
            let destination = format_playlist_link(row.link.as_deref()?)?;
            Some(Candidate::from_owned(name, destination))
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Merged(usize),
    FellBack,
    Stale,
}

#[derive(Debug, Default)]
pub struct Catalog {
    generation: u64,
    candidates: Vec<Candidate>,
}

impl Catalog {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Starts a new generation with the system destinations plus the live source.
    pub fn rebuild(&mut self, live: Option<&dyn CandidateSource>) -> RefreshTicket {
        self.generation += 1;
        self.candidates = system_destinations();
        if let Some(source) = live {
            self.candidates.extend(source.candidates());
        }
        debug!(
            generation = self.generation,
            candidates = self.candidates.len(),
            "catalog rebuilt"
        );
        RefreshTicket {
            generation: self.generation,
        }
    }

    pub fn apply_rootlist(
        &mut self,
        ticket: RefreshTicket,
        response: Result<String, ResolverError>,
    ) -> RefreshOutcome {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale playlist response"
            );
            return RefreshOutcome::Stale;
        }

        match response.and_then(|body| parse_rootlist(&body)) {
            Ok(playlists) => {
                let count = playlists.len();
                self.candidates.extend(playlists);
                RefreshOutcome::Merged(count)
            }
            Err(error) => {
                warn!(%error, "playlist fetch failed; keeping built-in destinations");
                RefreshOutcome::FellBack
            }
        }
    }
}
