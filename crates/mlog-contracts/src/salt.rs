//! The per-deployment digest salt.

use std::fmt;

/// Secret bytes mixed into every entry digest.
///
/// A salt must stay the same for the whole lifetime of a store: entries
/// written under one salt and verified under another all report as
/// tampered.  `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(Vec<u8>);

impl Salt {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Build a salt from a configured text value (its UTF-8 bytes).
    pub fn from_text(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt(<{} bytes redacted>)", self.0.len())
    }
}
