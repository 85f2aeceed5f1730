//! Integrity report types.
//!
//! The verifier produces one `EntryCheck` per stored entry and aggregates
//! them into an `IntegrityReport`.  Reports are plain data; presenting
//! them is the shell's job.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an entry is referred to in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryRef {
    /// The entry's own `entry_id`.
    Id(u64),
    /// 1-based position in the store, for entries without an id.
    Position(usize),
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryRef::Id(id) => write!(f, "{id}"),
            EntryRef::Position(pos) => write!(f, "#{pos}"),
        }
    }
}

/// Outcome of recomputing one entry's digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Recomputed digest equals the stored `unique_id`.
    Intact,
    /// Recomputed digest differs from the stored `unique_id`.
    Tampered,
    /// The entry carries no `unique_id` (minimal profile); nothing to compare.
    Unsigned,
}

/// The verdict for a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCheck {
    pub entry: EntryRef,
    pub status: EntryStatus,
}

impl EntryCheck {
    pub fn is_intact(&self) -> bool {
        self.status == EntryStatus::Intact
    }
}

impl fmt::Display for EntryCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = match self.entry {
            EntryRef::Id(id) => format!("Log entry with ID '{id}'"),
            EntryRef::Position(pos) => format!("Log entry #{pos}"),
        };
        match self.status {
            EntryStatus::Intact => write!(f, "{subject} is intact."),
            EntryStatus::Tampered => write!(f, "WARNING: {subject} has been tampered with!"),
            EntryStatus::Unsigned => write!(f, "{subject} has no digest and cannot be checked."),
        }
    }
}

/// Aggregate result of one verification pass, in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub checks: Vec<EntryCheck>,
    pub intact: usize,
    pub tampered: usize,
    pub unsigned: usize,
}

impl IntegrityReport {
    /// Build a report from per-entry checks, computing the counts.
    pub fn from_checks(checks: Vec<EntryCheck>) -> Self {
        let mut report = IntegrityReport::default();
        for check in &checks {
            match check.status {
                EntryStatus::Intact => report.intact += 1,
                EntryStatus::Tampered => report.tampered += 1,
                EntryStatus::Unsigned => report.unsigned += 1,
            }
        }
        report.checks = checks;
        report
    }

    /// True when no entry was found tampered.
    pub fn is_clean(&self) -> bool {
        self.tampered == 0
    }

    /// References of every tampered entry, in store order.
    pub fn tampered_entries(&self) -> Vec<EntryRef> {
        self.checks
            .iter()
            .filter(|c| c.status == EntryStatus::Tampered)
            .map(|c| c.entry)
            .collect()
    }

    /// One-line summary suitable for a dialog or terminal.
    pub fn summary(&self) -> String {
        if self.unsigned == 0 {
            format!(
                "Integrity check complete: {} intact, {} tampered.",
                self.intact, self.tampered
            )
        } else {
            format!(
                "Integrity check complete: {} intact, {} tampered, {} unsigned.",
                self.intact, self.tampered, self.unsigned
            )
        }
    }
}
