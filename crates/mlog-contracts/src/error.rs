//! Error taxonomy for the maintenance log core.
//!
//! Every fallible operation returns `MlogResult<T>`.  The core never retries
//! and never presents errors itself; the calling shell decides whether to
//! re-prompt, retry, or abort.

use thiserror::Error;

/// The unified error type for the maintenance log crates.
#[derive(Debug, Error)]
pub enum MlogError {
    /// A required operator field was empty after trimming.
    ///
    /// Raised before anything is persisted; the operator can correct the
    /// field and resubmit.
    #[error("validation failed for '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// The acting user could not be determined from the host environment.
    #[error("unable to resolve acting user: {reason}")]
    IdentityResolution { reason: String },

    /// The structured store exists but could not be parsed.
    ///
    /// `load()` and `append()` treat this as an empty store; only callers of
    /// `try_load()` ever see it.
    #[error("structured store '{path}' is corrupt: {reason}")]
    StoreCorrupt { path: String, reason: String },

    /// There is no structured store to read.
    #[error("no log data available at '{path}'")]
    NoData { path: String },

    /// A disk read or write failed.
    ///
    /// An entry is only considered logged once both formats were written.
    #[error("I/O failure on '{path}': {reason}")]
    Io { path: String, reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl MlogError {
    /// Shorthand for an empty-field validation failure.
    pub fn empty_field(field: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        }
    }
}

/// Convenience alias used throughout the maintenance log crates.
pub type MlogResult<T> = Result<T, MlogError>;
