//! The entry builder: turns raw operator input into a finalized entry.
//!
//! Pipeline per call to `finalize()`:
//!
//!   Validate → Resolve identity → Capture timestamp → Assign id → Digest
//!
//! Nothing is persisted here.  Any failure aborts before an entry exists,
//! so a rejected submission can never leave a partial record behind.

use tracing::debug;

use mlog_contracts::{EntryProfile, LogEntry, MlogError, MlogResult, Salt};

use crate::{
    digest::compute_unique_id,
    traits::{Clock, IdentityResolver, LogStore},
};

/// Builds finalized `LogEntry` values from form input plus ambient context.
///
/// Construct one per process from the immutable configuration; the
/// builder itself holds no mutable state.
pub struct EntryBuilder {
    identity: Box<dyn IdentityResolver>,
    clock: Box<dyn Clock>,
    /// Only the extended profile digests, so only it needs a salt.
    salt: Option<Salt>,
    profile: EntryProfile,
}

impl EntryBuilder {
    /// Create a builder producing extended-profile entries.
    pub fn new(identity: Box<dyn IdentityResolver>, clock: Box<dyn Clock>, salt: Salt) -> Self {
        Self {
            identity,
            clock,
            salt: Some(salt),
            profile: EntryProfile::Extended,
        }
    }

    /// Create a builder for `profile`, taking the salt only where needed.
    ///
    /// Returns `MlogError::Config` when `profile` is extended and `salt` is
    /// `None`.  A minimal-profile builder never digests and ignores `salt`.
    pub fn for_profile(
        identity: Box<dyn IdentityResolver>,
        clock: Box<dyn Clock>,
        profile: EntryProfile,
        salt: Option<Salt>,
    ) -> MlogResult<Self> {
        if profile == EntryProfile::Extended && salt.is_none() {
            return Err(MlogError::Config {
                reason: "the extended profile requires a salt to compute digests".to_string(),
            });
        }
        Ok(Self {
            identity,
            clock,
            salt,
            profile,
        })
    }

    pub fn with_profile(mut self, profile: EntryProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn profile(&self) -> EntryProfile {
        self.profile
    }

    /// Produce a finalized entry for `hostname` and `action_taken`.
    ///
    /// `store` is only read, to derive the next `entry_id`.
    ///
    /// # Errors
    ///
    /// - `MlogError::Validation` if either field is blank after trimming
    /// - `MlogError::IdentityResolution` if the acting user is unknown
    /// - `MlogError::StoreCorrupt` if the next `entry_id` cannot be derived
    /// - `MlogError::Config` if an extended entry is requested without a salt
    pub fn finalize(
        &self,
        hostname: &str,
        action_taken: &str,
        store: &dyn LogStore,
    ) -> MlogResult<LogEntry> {
        let hostname = hostname.trim();
        let action_taken = action_taken.trim();
        if hostname.is_empty() {
            return Err(MlogError::empty_field("hostname"));
        }
        if action_taken.is_empty() {
            return Err(MlogError::empty_field("action_taken"));
        }

        let username = self.identity.resolve()?;
        let timestamp = self.clock.now_timestamp();

        let entry = match self.profile {
            EntryProfile::Minimal => LogEntry {
                entry_id: None,
                hostname: hostname.to_string(),
                action_taken: action_taken.to_string(),
                username,
                timestamp,
                unique_id: None,
            },
            EntryProfile::Extended => {
                let salt = self.salt.as_ref().ok_or_else(|| MlogError::Config {
                    reason: "no salt available for extended-profile digest".to_string(),
                })?;
                let entry_id = store.next_entry_id()?;
                let unique_id =
                    compute_unique_id(salt, hostname, action_taken, &username, &timestamp);
                LogEntry {
                    entry_id: Some(entry_id),
                    hostname: hostname.to_string(),
                    action_taken: action_taken.to_string(),
                    username,
                    timestamp,
                    unique_id: Some(unique_id),
                }
            }
        };

        debug!(
            entry_id = ?entry.entry_id,
            hostname = %entry.hostname,
            username = %entry.username,
            "entry finalized"
        );

        Ok(entry)
    }
}
