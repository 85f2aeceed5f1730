//! Salted digest primitives.
//!
//! Hash input layout (bytes, in order, no separators):
//!   1. salt
//!   2. hostname as UTF-8
//!   3. action_taken as UTF-8
//!   4. username as UTF-8
//!   5. timestamp as UTF-8
//!
//! The digest is a pure function of these inputs.  Changing the salt
//! changes every digest, so a store verified under a different salt than
//! it was written with reports every entry as tampered.

use sha2::{Digest, Sha256};

use mlog_contracts::{LogEntry, Salt};

/// Compute the `unique_id` for the given fields.
///
/// Returns a lowercase 64-character hex string.
pub fn compute_unique_id(
    salt: &Salt,
    hostname: &str,
    action_taken: &str,
    username: &str,
    timestamp: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(hostname.as_bytes());
    hasher.update(action_taken.as_bytes());
    hasher.update(username.as_bytes());
    hasher.update(timestamp.as_bytes());

    hex::encode(hasher.finalize())
}

/// Recompute the digest of a stored entry from its current field values.
///
/// The stored `unique_id` is ignored; compare the result against it to
/// detect tampering.
pub fn entry_digest(salt: &Salt, entry: &LogEntry) -> String {
    compute_unique_id(
        salt,
        &entry.hostname,
        &entry.action_taken,
        &entry.username,
        &entry.timestamp,
    )
}
