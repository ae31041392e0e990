use std::collections::HashSet;

use tracing::warn;

use crate::config::{Config, DEFAULT_RECENT_LIMIT};
use crate::kv_store::{KeyValueStore, StorageError};
use crate::model::Candidate;

/// Most-recent-first list of committed candidates, unique by title, stored as a
/// single JSON array under one key.
pub struct RecentSearchStore<S> {
    storage: S,
    key: String,
    limit: usize,
}

impl<S: KeyValueStore> RecentSearchStore<S> {
    pub fn new(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
            limit: DEFAULT_RECENT_LIMIT as usize,
        }
    }

    pub fn from_config(storage: S, cfg: &Config) -> Self {
        Self::new(storage, &cfg.storage_key).with_limit(cfg.recent_limit as usize)
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Unset, unreadable, and corrupt values all read as an empty history.
    pub fn load(&self) -> Vec<Candidate> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(error) => {
                warn!(key = %self.key, %error, "recent searches unreadable");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Option<Vec<Candidate>>>(&raw) {
            Ok(entries) => {
                let mut entries = entries.unwrap_or_default();
                entries.truncate(self.limit);
                entries
            }
            Err(error) => {
                warn!(key = %self.key, %error, "recent searches corrupt; treating as empty");
                Vec::new()
            }
        }
    }

    pub fn append(&mut self, candidate: Candidate) -> Result<(), StorageError> {
        let mut entries = Vec::with_capacity(self.limit + 1);
        entries.push(candidate);
        entries.extend(self.load());

        let mut seen = HashSet::new();
        entries.retain(|entry| seen.insert(entry.title().to_string()));
        entries.truncate(self.limit);

        let encoded = serde_json::to_string(&entries)
            .map_err(|e| StorageError::Unavailable(format!("failed to encode recents: {e}")))?;
        self.storage.set(&self.key, &encoded)
    }
}
