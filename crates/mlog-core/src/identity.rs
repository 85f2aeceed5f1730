//! Ambient context providers: session identity and wall clock.

use chrono::Local;

use mlog_contracts::{MlogError, MlogResult, TIMESTAMP_FORMAT};

use crate::traits::{Clock, IdentityResolver};

/// Environment variables consulted for the session user, in order.
const SESSION_USER_VARS: [&str; 3] = ["USERNAME", "USER", "LOGNAME"];

/// Resolves the operating-system session user from the environment.
///
/// A `DOMAIN\user` value is reduced to `user`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionIdentity;

impl SessionIdentity {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn resolve_with<F>(lookup: F) -> MlogResult<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        for var in SESSION_USER_VARS {
            let Some(raw) = lookup(var) else { continue };
            let name = strip_domain(raw.trim());
            if !name.is_empty() {
                return Ok(name.to_string());
            }
        }
        Err(MlogError::IdentityResolution {
            reason: format!(
                "none of {} is set to a non-empty user name",
                SESSION_USER_VARS.join(", ")
            ),
        })
    }
}

impl IdentityResolver for SessionIdentity {
    fn resolve(&self) -> MlogResult<String> {
        Self::resolve_with(|var| std::env::var(var).ok())
    }
}

fn strip_domain(account: &str) -> &str {
    match account.rsplit_once('\\') {
        Some((_, user)) => user.trim(),
        None => account,
    }
}

/// Always resolves to the same user.
#[derive(Debug, Clone)]
pub struct FixedIdentity(pub String);

impl IdentityResolver for FixedIdentity {
    fn resolve(&self) -> MlogResult<String> {
        if self.0.trim().is_empty() {
            return Err(MlogError::IdentityResolution {
                reason: "fixed identity is empty".to_string(),
            });
        }
        Ok(self.0.clone())
    }
}

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_timestamp(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Always reports the same moment.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_timestamp(&self) -> String {
        self.0.clone()
    }
}
