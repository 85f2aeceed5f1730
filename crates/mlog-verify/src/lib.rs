//! # mlog-verify
//!
//! Tamper detection for the maintenance log.
//!
//! This crate provides [`engine::IntegrityVerifier`], which recomputes the
//! salted digest of every stored entry and reports, per entry, whether it
//! still matches the `unique_id` recorded at log time.  Modifying any of
//! hostname, action, username or timestamp in the structured store after
//! the fact flips that entry to tampered.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use mlog_verify::IntegrityVerifier;
//!
//! let verifier = IntegrityVerifier::new(salt);
//! let report = verifier.verify_store(&store)?;
//! println!("{}", report.summary());
//! ```

pub mod engine;

pub use engine::IntegrityVerifier;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use serde_json::Value;

    use mlog_contracts::{EntryProfile, EntryRef, EntryStatus, LogEntry, MlogError, Salt};
    use mlog_core::{
        identity::{FixedClock, FixedIdentity},
        traits::LogStore,
        EntryBuilder,
    };
    use mlog_store::{DualFormatStore, InMemoryStore};

    use super::IntegrityVerifier;

    const SCENARIO_DIGEST: &str =
        "14060a628e129a36d813956cc5b79bdec21b7fd0ec936ace7d8061077b835a2b";

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn salt() -> Salt {
        Salt::from_text("abc")
    }

    fn builder() -> EntryBuilder {
        EntryBuilder::new(
            Box::new(FixedIdentity("jdoe".to_string())),
            Box::new(FixedClock("2024-03-01 10:00:00".to_string())),
            salt(),
        )
    }

    fn log(store: &dyn LogStore, hostname: &str, action: &str) -> LogEntry {
        let entry = builder().finalize(hostname, action, store).unwrap();
        store.append(&entry).unwrap();
        entry
    }

    fn store_in(dir: &Path) -> DualFormatStore {
        DualFormatStore::new(dir.join("log.json"), dir.join("log.csv"))
    }

    /// Rewrite one string field of one entry directly in the JSON file.
    fn tamper_on_disk(store: &DualFormatStore, index: usize, field: &str, value: &str) {
        let path = store.structured_path();
        let mut doc: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        doc[index][field] = Value::String(value.to_string());
        fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    }

    // ── Scenario ──────────────────────────────────────────────────────────────

    /// Log, load, verify intact; edit the action on disk; verify tampered.
    #[test]
    fn test_reference_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        log(&store, "PC01", "Replaced battery");

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].unique_id.as_deref(), Some(SCENARIO_DIGEST));

        let verifier = IntegrityVerifier::new(salt());
        let report = verifier.verify_store(&store).unwrap();
        assert_eq!(report.checks[0].status, EntryStatus::Intact);
        assert_eq!((report.intact, report.tampered), (1, 0));

        tamper_on_disk(&store, 0, "action_taken", "Replaced battery pack");

        let report = verifier.verify_store(&store).unwrap();
        assert_eq!(report.checks[0].status, EntryStatus::Tampered);
        assert_eq!((report.intact, report.tampered), (0, 1));
        assert!(!report.is_clean());
    }

    // ── Tamper detection ──────────────────────────────────────────────────────

    /// Editing any one digested field flips only that entry.
    #[test]
    fn test_each_digested_field_is_tamper_evident() {
        for field in ["hostname", "action_taken", "username", "timestamp"] {
            let dir = tempfile::tempdir().unwrap();
            let store = store_in(dir.path());
            log(&store, "PC01", "Replaced battery");
            log(&store, "PC02", "Cleaned fans");
            log(&store, "PC03", "Swapped PSU");

            tamper_on_disk(&store, 1, field, "edited");

            let report = IntegrityVerifier::new(salt()).verify_store(&store).unwrap();
            assert_eq!(
                report.tampered_entries(),
                vec![EntryRef::Id(2)],
                "editing '{field}' must flag exactly entry 2"
            );
            assert_eq!(report.intact, 2);
        }
    }

    /// Replacing the stored digest itself is also detected.
    #[test]
    fn test_forged_digest_detected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        log(&store, "PC01", "Replaced battery");

        tamper_on_disk(&store, 0, "unique_id", &"0".repeat(64));

        let report = IntegrityVerifier::new(salt()).verify_store(&store).unwrap();
        assert_eq!(report.tampered, 1);
    }

    /// A different salt makes every signed entry look tampered.
    #[test]
    fn test_salt_change_flags_all_entries() {
        let store = InMemoryStore::new();
        log(&store, "PC01", "Replaced battery");
        log(&store, "PC02", "Cleaned fans");

        let report = IntegrityVerifier::new(Salt::from_text("rotated"))
            .verify_store(&store)
            .unwrap();
        assert_eq!((report.intact, report.tampered), (0, 2));
    }

    // ── Read-only pass ────────────────────────────────────────────────────────

    /// Verification leaves both files byte-for-byte unchanged.
    #[test]
    fn test_verify_does_not_modify_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        log(&store, "PC01", "Replaced battery");
        tamper_on_disk(&store, 0, "hostname", "PC02");

        let json_before = fs::read(store.structured_path()).unwrap();
        let csv_before = fs::read(store.tabular_path()).unwrap();

        IntegrityVerifier::new(salt()).verify_store(&store).unwrap();

        assert_eq!(fs::read(store.structured_path()).unwrap(), json_before);
        assert_eq!(fs::read(store.tabular_path()).unwrap(), csv_before);
    }

    // ── No data ───────────────────────────────────────────────────────────────

    /// A missing store is NoData, not an empty report.
    #[test]
    fn test_missing_store_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let err = IntegrityVerifier::new(salt()).verify_store(&store).unwrap_err();
        assert!(matches!(err, MlogError::NoData { .. }));
    }

    /// A corrupt store is NoData as well.
    #[test]
    fn test_corrupt_store_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.structured_path(), "[{\"hostname\":").unwrap();

        let err = IntegrityVerifier::new(salt()).verify_store(&store).unwrap_err();
        assert!(matches!(err, MlogError::NoData { .. }));
    }

    /// A store that is not UTF-8 is NoData too.
    #[test]
    fn test_non_utf8_store_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.structured_path(), [0xff, 0xfe, b'[', b']']).unwrap();

        let err = IntegrityVerifier::new(salt()).verify_store(&store).unwrap_err();
        assert!(matches!(err, MlogError::NoData { .. }));
    }

    /// An existing but empty collection verifies clean with zero entries.
    #[test]
    fn test_empty_collection_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.structured_path(), "[]").unwrap();

        let report = IntegrityVerifier::new(salt()).verify_store(&store).unwrap();
        assert!(report.checks.is_empty());
        assert!(report.is_clean());
    }

    // ── Unsigned entries ──────────────────────────────────────────────────────

    /// Minimal-profile entries are reported unsigned, by position.
    #[test]
    fn test_minimal_entries_are_unsigned() {
        let store = InMemoryStore::with_profile(EntryProfile::Minimal);
        log(&store, "PC01", "Replaced battery");

        let report = IntegrityVerifier::new(salt()).verify_store(&store).unwrap();
        assert_eq!(report.unsigned, 1);
        assert_eq!(report.intact, 0);
        assert_eq!(report.checks[0].entry, EntryRef::Position(1));
        assert!(report.is_clean());
    }

    /// `check` is deterministic over the same entries.
    #[test]
    fn test_check_is_pure() {
        let store = InMemoryStore::new();
        log(&store, "PC01", "Replaced battery");
        let entries = store.load();

        let verifier = IntegrityVerifier::new(salt());
        assert_eq!(verifier.check(&entries), verifier.check(&entries));
    }
}
