//! File-backed dual-format store.
//!
//! `DualFormatStore` keeps two files per logging period:
//!
//! - the **structured store**: a pretty-printed JSON array of `LogEntry`,
//!   rewritten whole on every append (read, push, write back);
//! - the **tabular export**: a CSV file that only ever grows by one row per
//!   append, with the header written when the file is first created.
//!
//! No transaction spans the two writes.  If the structured write succeeds
//! and the CSV append fails, the formats diverge and the error is returned
//! to the caller.  There is no locking either; two processes appending at
//! once can lose entries in the structured file.

use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, warn};

use mlog_contracts::{EntryProfile, LogEntry, MlogError, MlogResult};
use mlog_core::traits::LogStore;

/// A `LogStore` persisting to a JSON structured file and a CSV export.
#[derive(Debug, Clone)]
pub struct DualFormatStore {
    structured_path: PathBuf,
    tabular_path: PathBuf,
    profile: EntryProfile,
}

impl DualFormatStore {
    /// Create a store over the given files.  Neither needs to exist yet.
    pub fn new(structured_path: impl Into<PathBuf>, tabular_path: impl Into<PathBuf>) -> Self {
        Self {
            structured_path: structured_path.into(),
            tabular_path: tabular_path.into(),
            profile: EntryProfile::Extended,
        }
    }

    /// Persist entries in the given profile's shape.
    pub fn with_profile(mut self, profile: EntryProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn structured_path(&self) -> &Path {
        &self.structured_path
    }

    pub fn tabular_path(&self) -> &Path {
        &self.tabular_path
    }

    /// Load the structured collection for an append.
    ///
    /// Missing and corrupt files both start a fresh collection.  Corruption
    /// is logged because the next write replaces the unreadable content.
    fn load_for_append(&self) -> MlogResult<Vec<LogEntry>> {
        match self.try_load() {
            Ok(entries) => Ok(entries),
            Err(MlogError::NoData { .. }) => Ok(Vec::new()),
            Err(MlogError::StoreCorrupt { path, reason }) => {
                warn!(
                    path = %path,
                    reason = %reason,
                    "structured store is corrupt; starting a new collection"
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn write_structured(&self, entries: &[LogEntry]) -> MlogResult<()> {
        ensure_parent(&self.structured_path)?;

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        entries.serialize(&mut ser).map_err(|e| MlogError::Io {
            path: self.structured_path.display().to_string(),
            reason: format!("failed to serialize entries: {}", e),
        })?;

        fs::write(&self.structured_path, buf).map_err(|e| io_failure(&self.structured_path, e))
    }

    fn append_tabular(&self, entry: &LogEntry) -> MlogResult<()> {
        ensure_parent(&self.tabular_path)?;

        let existed = self.tabular_path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.tabular_path)
            .map_err(|e| io_failure(&self.tabular_path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if !existed {
            writer
                .write_record(self.profile.tabular_header())
                .map_err(|e| csv_failure(&self.tabular_path, e))?;
        }
        writer
            .write_record(entry.tabular_row().record(self.profile))
            .map_err(|e| csv_failure(&self.tabular_path, e))?;
        writer.flush().map_err(|e| io_failure(&self.tabular_path, e))
    }
}

impl LogStore for DualFormatStore {
    /// Append to the structured store, then to the tabular export.
    ///
    /// Returns the first failure.  The entry only counts as logged when both
    /// writes succeeded.
    fn append(&self, entry: &LogEntry) -> MlogResult<()> {
        let entry = entry.project(self.profile);

        let mut entries = self.load_for_append()?;
        entries.push(entry.clone());
        self.write_structured(&entries)?;
        self.append_tabular(&entry)?;

        info!(
            entry_id = ?entry.entry_id,
            hostname = %entry.hostname,
            total = entries.len(),
            "entry appended to structured store and tabular export"
        );
        Ok(())
    }

    fn try_load(&self) -> MlogResult<Vec<LogEntry>> {
        let path = self.structured_path.display().to_string();
        let contents = match fs::read(&self.structured_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(MlogError::NoData { path });
            }
            Err(e) => return Err(io_failure(&self.structured_path, e)),
        };

        let entries: Vec<LogEntry> =
            serde_json::from_slice(&contents).map_err(|e| MlogError::StoreCorrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        debug!(path = %path, count = entries.len(), "structured store loaded");
        Ok(entries)
    }

    fn location(&self) -> String {
        self.structured_path.display().to_string()
    }
}

fn ensure_parent(path: &Path) -> MlogResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| io_failure(parent, e))
        }
        _ => Ok(()),
    }
}

fn io_failure(path: &Path, e: io::Error) -> MlogError {
    MlogError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn csv_failure(path: &Path, e: csv::Error) -> MlogError {
    MlogError::Io {
        path: path.display().to_string(),
        reason: format!("failed to write CSV row: {}", e),
    }
}
