//! Seam traits for the maintenance log core.
//!
//! - `IdentityResolver`: who is acting (session user, directory lookup, fixed)
//! - `Clock`: when the entry is created
//! - `LogStore`: where finalized entries are appended and read back
//!
//! The entry builder depends only on these traits, so the shell can swap
//! the session lookup or the storage backend without touching the core.

use tracing::{debug, warn};

use mlog_contracts::{LogEntry, MlogError, MlogResult};

/// Resolves the identity of the user performing the action.
pub trait IdentityResolver: Send + Sync {
    /// Return the acting user's name.
    ///
    /// Fails with `MlogError::IdentityResolution` when no identity can be
    /// determined; the caller must not write an entry in that case.
    fn resolve(&self) -> MlogResult<String>;
}

/// Supplies the creation timestamp of new entries.
pub trait Clock: Send + Sync {
    /// The current moment rendered in `TIMESTAMP_FORMAT`.
    fn now_timestamp(&self) -> String;
}

/// Durable storage for finalized entries.
///
/// Implementations are append-only: entries are never modified or removed.
/// On-disk (or in-memory) order is insertion order, oldest first.
pub trait LogStore: Send + Sync {
    /// Append one finalized entry.
    ///
    /// The entry is only considered logged when this returns `Ok`.
    fn append(&self, entry: &LogEntry) -> MlogResult<()>;

    /// Read every stored entry, distinguishing the failure modes.
    ///
    /// Returns `MlogError::NoData` when there is no store yet and
    /// `MlogError::StoreCorrupt` when it cannot be parsed.
    fn try_load(&self) -> MlogResult<Vec<LogEntry>>;

    /// Human-readable location of the structured store, for messages.
    fn location(&self) -> String;

    /// Read every stored entry; a missing or corrupt store reads as empty.
    fn load(&self) -> Vec<LogEntry> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(MlogError::NoData { path }) => {
                debug!(path = %path, "no structured store yet, loading as empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "structured store unreadable, loading as empty");
                Vec::new()
            }
        }
    }

    /// The `entry_id` the next appended entry should carry.
    ///
    /// Last stored entry's id plus one; 1 when the store is empty, missing,
    /// corrupt, or its last entry carries no id.
    ///
    /// Fails with `MlogError::StoreCorrupt` when the last id is `u64::MAX`,
    /// which no sequence of appends can produce.
    fn next_entry_id(&self) -> MlogResult<u64> {
        let last = self
            .load()
            .last()
            .and_then(|entry| entry.entry_id)
            .unwrap_or(0);
        last.checked_add(1).ok_or_else(|| MlogError::StoreCorrupt {
            path: self.location(),
            reason: format!("last entry_id {last} cannot be incremented"),
        })
    }
}
