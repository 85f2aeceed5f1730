//! # mlog-core
//!
//! Entry construction and digesting for the maintenance log.
//!
//! This crate provides:
//! - The seam traits (`IdentityResolver`, `Clock`, `LogStore`)
//! - The salted SHA-256 digest over an entry's identifying fields
//! - The `EntryBuilder` that validates input and finalizes entries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mlog_core::{EntryBuilder, identity::{SessionIdentity, SystemClock}};
//!
//! let builder = EntryBuilder::new(Box::new(SessionIdentity), Box::new(SystemClock), salt);
//! let entry = builder.finalize("PC01", "Replaced battery", &store)?;
//! store.append(&entry)?;
//! ```

pub mod builder;
pub mod digest;
pub mod identity;
pub mod traits;

pub use builder::EntryBuilder;
pub use digest::{compute_unique_id, entry_digest};

// ── Tests ─────────────────────────────────────────────────────────────────────
