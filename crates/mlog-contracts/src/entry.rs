//! Log entry types and their projections.
//!
//! `LogEntry` is what the structured store holds, one per recorded action.
//! `TabularRow` is the flattened projection written to the spreadsheet
//! export; it never carries the digest.

use serde::{Deserialize, Serialize};

/// `strftime` pattern for entry timestamps (local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which fields an entry carries.
///
/// `Extended` is the canonical shape.  `Minimal` drops the sequence number
/// and the digest and is a strict projection of `Extended`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryProfile {
    Minimal,
    #[default]
    Extended,
}

impl EntryProfile {
    /// Column headers of the tabular export for this profile.
    pub fn tabular_header(self) -> &'static [&'static str] {
        match self {
            EntryProfile::Minimal => &["hostname", "action_taken", "username", "timestamp"],
            EntryProfile::Extended => &[
                "hostname",
                "action_taken",
                "username",
                "timestamp",
                "entry_id",
            ],
        }
    }
}

impl std::str::FromStr for EntryProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(EntryProfile::Minimal),
            "extended" => Ok(EntryProfile::Extended),
            other => Err(format!("unknown entry profile '{other}' (expected 'minimal' or 'extended')")),
        }
    }
}

/// One recorded maintenance action.
///
/// Created exactly once at log time and never mutated afterwards.  The
/// optional fields are absent in minimal-profile stores, so both shapes
/// deserialize from the same structured file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the store, starting at 1, gapless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<u64>,

    /// Machine the action was performed on.
    pub hostname: String,

    /// Free text, possibly multi-line.
    pub action_taken: String,

    /// Acting user, resolved from the session rather than typed in.
    pub username: String,

    /// Creation time in `TIMESTAMP_FORMAT`, captured once.
    pub timestamp: String,

    /// Salted SHA-256 hex digest over the four fields above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
}

impl LogEntry {
    /// The spreadsheet projection of this entry.
    pub fn tabular_row(&self) -> TabularRow {
        TabularRow {
            hostname: self.hostname.clone(),
            action_taken: self.action_taken.clone(),
            username: self.username.clone(),
            timestamp: self.timestamp.clone(),
            entry_id: self.entry_id,
        }
    }

    /// Strip the fields the given profile does not carry.
    pub fn project(&self, profile: EntryProfile) -> LogEntry {
        match profile {
            EntryProfile::Extended => self.clone(),
            EntryProfile::Minimal => LogEntry {
                entry_id: None,
                unique_id: None,
                ..self.clone()
            },
        }
    }
}

/// One row of the tabular export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRow {
    pub hostname: String,
    pub action_taken: String,
    pub username: String,
    pub timestamp: String,
    pub entry_id: Option<u64>,
}

impl TabularRow {
    /// Field values in `EntryProfile::tabular_header` order.
    ///
    /// A missing `entry_id` under the extended profile becomes an empty cell.
    pub fn record(&self, profile: EntryProfile) -> Vec<String> {
        let mut fields = vec![
            self.hostname.clone(),
            self.action_taken.clone(),
            self.username.clone(),
            self.timestamp.clone(),
        ];
        if profile == EntryProfile::Extended {
            fields.push(self.entry_id.map(|id| id.to_string()).unwrap_or_default());
        }
        fields
    }
}
