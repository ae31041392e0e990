use tracing::{debug, info, warn};

use crate::catalog::{
    system_destinations, Catalog, CandidateSource, PlaylistResolver, RefreshOutcome,
    RefreshTicket, ResolverError,
};
use crate::config::Config;
use crate::kv_store::KeyValueStore;
use crate::model::{Candidate, RankedResult};
use crate::palette::{PalettePhase, PaletteState, ToggleAction};
use crate::recent_store::RecentSearchStore;
use crate::search::{build_matcher, rank, Matcher};
use crate::surface::{navigate, Navigator, Panel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    Other,
}

impl PaletteKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            _ => Self::Other,
        }
    }
}

/// Owns the palette session: panel, selection, results and the catalog they are
/// ranked from. Every handler swallows page failures after logging them, so a
/// broken panel only ever makes the current action do nothing.
pub struct PaletteController<P, N, S> {
    state: PaletteState,
    matcher: Box<dyn Matcher>,
    panel: P,
    navigator: N,
    recents: RecentSearchStore<S>,
    catalog: Catalog,
    live_source: Option<Box<dyn CandidateSource>>,
    resolver: Option<Box<dyn PlaylistResolver>>,
    results: Vec<RankedResult>,
    query: String,
    max_results: usize,
    idle_shows_system_destinations: bool,
    fetch_playlists: bool,
}

impl<P: Panel, N: Navigator, S: KeyValueStore> PaletteController<P, N, S> {
    pub fn new(cfg: &Config, panel: P, navigator: N, storage: S) -> Self {
        Self {
            state: PaletteState::default(),
            matcher: build_matcher(cfg),
            panel,
            navigator,
            recents: RecentSearchStore::from_config(storage, cfg),
            catalog: Catalog::default(),
            live_source: None,
            resolver: None,
            results: Vec::new(),
            query: String::new(),
            max_results: cfg.max_results as usize,
            idle_shows_system_destinations: cfg.idle_shows_system_destinations,
            fetch_playlists: cfg.fetch_playlists,
        }
    }

    pub fn with_matcher(mut self, matcher: Box<dyn Matcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_live_source(mut self, source: Box<dyn CandidateSource>) -> Self {
        self.live_source = Some(source);
        self
    }

    pub fn with_playlist_resolver(mut self, resolver: Box<dyn PlaylistResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn state(&self) -> &PaletteState {
        &self.state
    }

    pub fn phase(&self) -> PalettePhase {
        self.state.phase()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[RankedResult] {
        &self.results
    }

    pub fn selected(&self) -> Option<&RankedResult> {
        self.results.get(self.state.selected_index())
    }

    pub fn catalog(&self) -> &[Candidate] {
        self.catalog.candidates()
    }

    pub fn generation(&self) -> u64 {
        self.catalog.generation()
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn recent_searches(&self) -> Vec<Candidate> {
        self.recents.load()
    }

    /// Global shortcut handler.
    pub fn toggle(&mut self) {
        match self.state.toggle_action() {
            ToggleAction::Open { first_mount } => self.open(first_mount),
            ToggleAction::Close => self.close(),
        }
    }

    pub fn handle_input(&mut self, text: &str) {
        if !self.state.is_open() {
            return;
        }
        let before = (self.state, std::mem::replace(&mut self.query, text.to_string()));
        self.state.set_filtering(!text.trim().is_empty());
        if !self.refresh_results(false) {
            (self.state, self.query) = before;
        }
    }

    /// Returns whether the key was consumed by the palette.
    pub fn handle_key(&mut self, key: PaletteKey) -> bool {
        if !self.state.is_open() {
            return false;
        }

        match key {
            PaletteKey::Escape => {
                self.close();
                true
            }
            PaletteKey::Enter => self.commit(),
            PaletteKey::ArrowDown => self.move_selection(PaletteState::advance),
            PaletteKey::ArrowUp => self.move_selection(PaletteState::retreat),
            PaletteKey::Other => false,
        }
    }

    /// Completion of a playlist request issued at open. Responses from an
    /// earlier session, or arriving after close, are dropped.
    pub fn on_rootlist_loaded(
        &mut self,
        ticket: RefreshTicket,
        response: Result<String, ResolverError>,
    ) -> RefreshOutcome {
        if !self.state.is_open() {
            debug!(
                ticket = ticket.generation(),
                "palette closed; dropping playlist response"
            );
            return RefreshOutcome::Stale;
        }

        let outcome = self.catalog.apply_rootlist(ticket, response);
        if matches!(outcome, RefreshOutcome::Merged(_))
            && self.state.phase() == PalettePhase::OpenFiltering
        {
            self.refresh_results(true);
        }
        outcome
    }

    fn open(&mut self, first_mount: bool) {
        if first_mount {
            if let Err(error) = self.panel.mount() {
                warn!(%error, "quick switcher mount failed");
                return;
            }
            self.state.mark_mounted();
        }

        if let Err(error) = self.panel.show() {
            warn!(%error, "quick switcher could not be shown");
            return;
        }

        self.state.open();
        self.query.clear();
        let ticket = self.catalog.rebuild(self.live_source.as_deref());
        if !self.refresh_results(false) {
            self.close();
            return;
        }

        if let Err(error) = self.panel.attach_listeners() {
            warn!(%error, "quick switcher input unavailable");
            self.close();
            return;
        }

        if self.fetch_playlists {
            if let Some(resolver) = self.resolver.as_mut() {
                resolver.request_rootlist(ticket);
            }
        }

        debug!(
            generation = ticket.generation(),
            matcher = self.matcher.name(),
            results = self.results.len(),
            "quick switcher opened"
        );
    }

    fn close(&mut self) {
        if !self.state.close() {
            return;
        }
        self.panel.hide();
        self.panel.detach_listeners();
        self.panel.reset_decorations();
        self.results.clear();
        self.query.clear();
        debug!("quick switcher closed");
    }

    fn commit(&mut self) -> bool {
        let Some(selected) = self.results.get(self.state.selected_index()) else {
            return false;
        };
        let candidate = selected.candidate.clone();

        if let Err(error) = navigate(&mut self.navigator, candidate.destination_id()) {
            warn!(%error, destination = candidate.destination_id(), "navigation failed");
            return false;
        }
        info!(destination = candidate.destination_id(), "quick switcher navigated");

        self.close();
        if let Err(error) = self.recents.append(candidate) {
            warn!(%error, "failed to record recent search");
        }
        true
    }

    fn move_selection(&mut self, step: fn(&mut PaletteState) -> Option<(usize, usize)>) -> bool {
        let before = self.state;
        let Some((previous, current)) = step(&mut self.state) else {
            return false;
        };

        if previous != current {
            let restyled = self
                .panel
                .restyle_row(previous, false)
                .and_then(|()| self.panel.restyle_row(current, true));
            if let Err(error) = restyled {
                warn!(%error, "result highlight failed");
                self.state = before;
                if let Err(error) = self.panel.restyle_row(previous, true) {
                    warn!(%error, "previous highlight could not be restored");
                }
            }
        }
        true
    }

    /// Re-ranks and repaints. With `keep_selection` the highlighted candidate
    /// stays selected if it is still listed; otherwise the first row is. Nothing
    /// changes when the repaint fails.
    fn refresh_results(&mut self, keep_selection: bool) -> bool {
        let idle = self.query.trim().is_empty();
        let recents = if idle { self.recents.load() } else { Vec::new() };

        let mut results = rank(
            self.matcher.as_ref(),
            &self.query,
            self.catalog.candidates(),
            &recents,
            self.max_results,
        );
        if idle && results.is_empty() && self.idle_shows_system_destinations {
            results = system_destinations()
                .into_iter()
                .take(self.max_results)
                .map(RankedResult::unscored)
                .collect();
        }

        let selected = self
            .selected()
            .filter(|_| keep_selection)
            .and_then(|current| {
                let id = current.candidate.destination_id();
                results
                    .iter()
                    .position(|r| r.candidate.destination_id() == id)
            })
            .unwrap_or(0);

        let titles: Vec<&str> = results.iter().map(|r| r.candidate.title()).collect();
        if let Err(error) = self.panel.render_results(&titles, selected) {
            warn!(%error, "result list render failed");
            return false;
        }

        self.state.set_results(results.len(), selected);
        self.results = results;
        true
    }
}
