//! # mlog-contracts
//!
//! Shared types and error taxonomy for the maintenance log.
//!
//! Every crate in the workspace imports from here. No business logic lives
//! in this crate, only data definitions, projections and error types.

pub mod entry;
pub mod error;
pub mod integrity;
pub mod salt;

pub use entry::{EntryProfile, LogEntry, TabularRow, TIMESTAMP_FORMAT};
pub use error::{MlogError, MlogResult};
pub use integrity::{EntryCheck, EntryRef, EntryStatus, IntegrityReport};
pub use salt::Salt;
