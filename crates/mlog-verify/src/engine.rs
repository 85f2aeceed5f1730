//! Digest-based integrity verifier.
//!
//! `IntegrityVerifier` recomputes each stored entry's digest from its
//! current field values and the configured salt, then compares it with the
//! stored `unique_id`.  The pass is read-only: it never writes to either
//! store file, and it never repairs what it finds.

use tracing::{debug, info, warn};

use mlog_contracts::{
    EntryCheck, EntryRef, EntryStatus, IntegrityReport, LogEntry, MlogError, MlogResult, Salt,
};
use mlog_core::{digest::entry_digest, traits::LogStore};

/// Checks stored entries against their recorded digests.
///
/// Must be constructed with the same salt the entries were written under;
/// under any other salt every signed entry reports as tampered.
pub struct IntegrityVerifier {
    salt: Salt,
}

impl IntegrityVerifier {
    pub fn new(salt: Salt) -> Self {
        Self { salt }
    }

    /// Check a single entry.
    ///
    /// `position` is the entry's 0-based index in the store and is only used
    /// to name entries that carry no `entry_id`.
    pub fn check_entry(&self, position: usize, entry: &LogEntry) -> EntryCheck {
        let entry_ref = entry
            .entry_id
            .map(EntryRef::Id)
            .unwrap_or(EntryRef::Position(position + 1));

        let status = match &entry.unique_id {
            None => EntryStatus::Unsigned,
            Some(stored) if *stored == entry_digest(&self.salt, entry) => EntryStatus::Intact,
            Some(_) => EntryStatus::Tampered,
        };

        if status == EntryStatus::Tampered {
            warn!(entry = %entry_ref, hostname = %entry.hostname, "digest mismatch, entry tampered");
        }

        EntryCheck {
            entry: entry_ref,
            status,
        }
    }

    /// Check every entry, in store order.
    pub fn check(&self, entries: &[LogEntry]) -> IntegrityReport {
        let checks = entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| self.check_entry(pos, entry))
            .collect();
        IntegrityReport::from_checks(checks)
    }

    /// Load the store and check every entry.
    ///
    /// # Errors
    ///
    /// Returns `MlogError::NoData` when the structured store is missing or
    /// cannot be parsed.  No per-entry checks are performed in that case.
    pub fn verify_store(&self, store: &dyn LogStore) -> MlogResult<IntegrityReport> {
        let entries = match store.try_load() {
            Ok(entries) => entries,
            Err(MlogError::StoreCorrupt { path, reason }) => {
                warn!(path = %path, reason = %reason, "cannot verify a corrupt store");
                return Err(MlogError::NoData { path });
            }
            Err(e) => return Err(e),
        };

        debug!(location = %store.location(), count = entries.len(), "verifying store");
        let report = self.check(&entries);

        info!(
            intact = report.intact,
            tampered = report.tampered,
            unsigned = report.unsigned,
            "integrity check complete"
        );
        Ok(report)
    }
}
