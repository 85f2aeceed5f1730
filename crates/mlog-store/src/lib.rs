//! # mlog-store
//!
//! Append-only, dual-format persistence for maintenance log entries.
//!
//! ## Overview
//!
//! Every finalized entry is written twice: into a structured JSON store
//! (the authoritative record, digest included) and as one row of a CSV
//! export meant for spreadsheets (digest excluded).  Loading reads the
//! structured store only; a missing or unparsable file loads as empty.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mlog_store::DualFormatStore;
//! use mlog_core::traits::LogStore;
//!
//! let store = DualFormatStore::new("MAR_2024_maintenance_log.json", "MAR_2024_maintenance_log.csv");
//! store.append(&entry)?;
//! let entries = store.load();
//! ```

pub mod file;
pub mod memory;

pub use file::DualFormatStore;
pub use memory::InMemoryStore;

// ── Tests ─────────────────────────────────────────────────────────────────────
