//! # mlog-config
//!
//! Startup configuration for the maintenance log.
//!
//! ## Overview
//!
//! [`LoggerConfig`] resolves the shared storage directory, the digest salt,
//! the branding asset path and the entry profile from a TOML file, a `.env`
//! file and the process environment.  [`LogPeriod`] turns a calendar month
//! into the pair of file names that hold that month's entries.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use mlog_config::{LoggerConfig, LogPeriod};
//!
//! let config = LoggerConfig::load(None)?;
//! let paths = config.store_paths(&LogPeriod::current());
//! ```

pub mod config;
pub mod period;

pub use config::{generate_salt, FileConfig, LoggerConfig, StorePaths};
pub use period::LogPeriod;

// ── Tests ─────────────────────────────────────────────────────────────────────
