//! In-memory implementation of `LogStore`.
//!
//! `InMemoryStore` mirrors the dual-format behaviour of `DualFormatStore`
//! without touching disk: it keeps the structured collection and the
//! tabular rows (header included) behind a `Mutex`.  Useful for tests and
//! for shells that want a scratch log.

use std::sync::{Arc, Mutex};

use tracing::debug;

use mlog_contracts::{EntryProfile, LogEntry, MlogError, MlogResult};
use mlog_core::traits::LogStore;

/// The mutable interior of an `InMemoryStore`.
pub(crate) struct InMemoryState {
    /// `None` until the first append, like a file that does not exist yet.
    pub(crate) entries: Option<Vec<LogEntry>>,

    /// Tabular export rows, header first.
    pub(crate) rows: Vec<Vec<String>>,
}

/// An append-only store held entirely in memory.
pub struct InMemoryStore {
    profile: EntryProfile,
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_profile(EntryProfile::Extended)
    }

    pub fn with_profile(profile: EntryProfile) -> Self {
        Self {
            profile,
            state: Arc::new(Mutex::new(InMemoryState {
                entries: None,
                rows: Vec::new(),
            })),
        }
    }

    /// Snapshot of the tabular export, header row first.
    pub fn tabular_rows(&self) -> Vec<Vec<String>> {
        self.state
            .lock()
            .map(|state| state.rows.clone())
            .unwrap_or_default()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LogStore for InMemoryStore {
    fn append(&self, entry: &LogEntry) -> MlogResult<()> {
        let mut state = self.state.lock().map_err(|e| MlogError::Io {
            path: self.location(),
            reason: format!("store state lock poisoned: {}", e),
        })?;

        let entry = entry.project(self.profile);
        if state.rows.is_empty() {
            let header = self
                .profile
                .tabular_header()
                .iter()
                .map(|h| h.to_string())
                .collect();
            state.rows.push(header);
        }
        state.rows.push(entry.tabular_row().record(self.profile));
        state.entries.get_or_insert_with(Vec::new).push(entry);

        debug!(count = state.entries.as_ref().map_or(0, Vec::len), "entry appended in memory");
        Ok(())
    }

    fn try_load(&self) -> MlogResult<Vec<LogEntry>> {
        let state = self.state.lock().map_err(|e| MlogError::Io {
            path: self.location(),
            reason: format!("store state lock poisoned: {}", e),
        })?;

        state.entries.clone().ok_or_else(|| MlogError::NoData {
            path: self.location(),
        })
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
