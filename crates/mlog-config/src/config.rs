//! Process-wide logger configuration.
//!
//! Values are resolved once at startup, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. the TOML config file (`mlog.toml` in the working directory, or an
//!    explicit `--config` path)
//! 3. a `.env` file in the working directory
//! 4. the process environment
//!
//! `.env` values never override variables already set in the environment,
//! which gives layers 3 and 4 their order.  The resulting `LoggerConfig` is
//! immutable and is passed explicitly to the core.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use mlog_contracts::{EntryProfile, MlogError, MlogResult, Salt};

use crate::period::LogPeriod;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "mlog.toml";

/// Default branding asset path.
pub const DEFAULT_LOGO_PATH: &str = "images/generic_logo.png";

pub const ENV_SHARED_PATH: &str = "SHARED_PATH";
pub const ENV_SALT: &str = "SALT_GEN";
pub const ENV_LOGO: &str = "LOGO_IMG";
pub const ENV_PROFILE: &str = "MLOG_PROFILE";

/// The on-disk TOML schema.  Every key is optional.
///
/// ```toml
/// shared_path = "//fileserver/it/maintenance"
/// salt = "change-me"
/// logo_path = "images/company_logo.png"
/// profile = "extended"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub shared_path: Option<PathBuf>,
    pub salt: Option<String>,
    pub logo_path: Option<PathBuf>,
    pub profile: Option<EntryProfile>,
}

impl FileConfig {
    pub fn from_toml_str(s: &str) -> MlogResult<Self> {
        toml::from_str(s).map_err(|e| MlogError::Config {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    pub fn from_file(path: &Path) -> MlogResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MlogError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}

/// Paths of the two files that make up one period's store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub structured: PathBuf,
    pub tabular: PathBuf,
}

/// Resolved configuration for one run of the logger.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Directory holding every period's files.
    pub shared_path: PathBuf,
    /// Branding asset for graphical shells; unused by the core.
    pub logo_path: PathBuf,
    pub profile: EntryProfile,
    salt: Option<Salt>,
}

impl LoggerConfig {
    /// Resolve configuration from every source.
    ///
    /// `config_path` names an explicit TOML file, which must exist.  Without
    /// it, `mlog.toml` in the working directory is used when present.
    pub fn load(config_path: Option<&Path>) -> MlogResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => debug!("no .env file found"),
            Err(e) => {
                return Err(MlogError::Config {
                    reason: format!("failed to load .env file: {}", e),
                })
            }
        }

        let file = match config_path {
            Some(path) => FileConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                FileConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => FileConfig::default(),
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with environment lookups.
    ///
    /// `lookup` returns the value of an environment variable, if set.  Empty
    /// values count as unset.
    pub fn from_sources<F>(file: FileConfig, lookup: F) -> MlogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let shared_path = env(ENV_SHARED_PATH)
            .map(PathBuf::from)
            .or(file.shared_path)
            .unwrap_or_else(|| PathBuf::from("."));

        let logo_path = env(ENV_LOGO)
            .map(PathBuf::from)
            .or(file.logo_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGO_PATH));

        let profile = match env(ENV_PROFILE) {
            Some(raw) => raw
                .parse::<EntryProfile>()
                .map_err(|reason| MlogError::Config { reason })?,
            None => file.profile.unwrap_or_default(),
        };

        let salt = env(ENV_SALT)
            .or(file.salt.filter(|s| !s.trim().is_empty()))
            .map(|s| Salt::from_text(&s));

        if salt.is_none() && profile == EntryProfile::Extended {
            warn!("no salt configured; entries cannot be logged or verified until {ENV_SALT} is set");
        }

        Ok(Self {
            shared_path,
            logo_path,
            profile,
            salt,
        })
    }

    /// The configured salt.
    ///
    /// # Errors
    ///
    /// `MlogError::Config` when none is configured.  A process-local random
    /// salt is never substituted: entries signed with it could not be
    /// verified by any later run.
    pub fn salt(&self) -> MlogResult<&Salt> {
        self.salt.as_ref().ok_or_else(|| MlogError::Config {
            reason: format!(
                "no salt configured; set {ENV_SALT} in the environment or .env (see `mlog gen-salt`)"
            ),
        })
    }

    /// The salt the configured profile digests with.
    ///
    /// `Ok(None)` for the minimal profile, which never digests.
    ///
    /// # Errors
    ///
    /// `MlogError::Config` for the extended profile without a salt.
    pub fn digest_salt(&self) -> MlogResult<Option<&Salt>> {
        match self.profile {
            EntryProfile::Minimal => Ok(None),
            EntryProfile::Extended => self.salt().map(Some),
        }
    }

    pub fn has_salt(&self) -> bool {
        self.salt.is_some()
    }

    /// File paths of the given period's store.
    pub fn store_paths(&self, period: &LogPeriod) -> StorePaths {
        StorePaths {
            structured: self.shared_path.join(period.structured_file_name()),
            tabular: self.shared_path.join(period.tabular_file_name()),
        }
    }
}

/// A fresh random salt suitable for `SALT_GEN` (32 lowercase hex chars).
pub fn generate_salt() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
