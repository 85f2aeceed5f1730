//! mlog: desk-side maintenance logger.
//!
//! Records maintenance actions into the current month's store, lists
//! recorded entries, and checks stored entries for after-the-fact edits.
//!
//! Usage:
//!   mlog log --hostname PC01 --action "Replaced battery"
//!   mlog log --hostname PC01 --action -        (read action text from stdin)
//!   mlog view [--period MAR_2024]
//!   mlog verify [--period MAR_2024]
//!   mlog gen-salt

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mlog_config::{generate_salt, LogPeriod, LoggerConfig};
use mlog_contracts::{LogEntry, MlogError, MlogResult};
use mlog_core::{
    identity::{SessionIdentity, SystemClock},
    traits::LogStore,
    EntryBuilder,
};
use mlog_store::DualFormatStore;
use mlog_verify::IntegrityVerifier;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Maintenance log: record, view and verify maintenance actions.
#[derive(Parser)]
#[command(
    name = "mlog",
    about = "Desk-side maintenance logger",
    long_about = "Records maintenance actions with a salted SHA-256 digest into a JSON store\n\
                  and a CSV export, one pair of files per month, and verifies stored\n\
                  entries against their digests."
)]
struct Cli {
    /// TOML config file (defaults to ./mlog.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record one maintenance action in the current month's log.
    Log {
        /// Machine the action was performed on.
        #[arg(long)]
        hostname: String,
        /// What was done.  Pass `-` to read multi-line text from stdin.
        #[arg(long)]
        action: String,
    },
    /// List recorded entries.
    View {
        /// Month to show, e.g. MAR_2024 (defaults to the current month).
        #[arg(long)]
        period: Option<String>,
    },
    /// Check stored entries for tampering.
    Verify {
        /// Month to check, e.g. MAR_2024 (defaults to the current month).
        #[arg(long)]
        period: Option<String>,
    },
    /// Print a new random salt for SALT_GEN.
    GenSalt,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Command::Log { hostname, action } => LoggerConfig::load(config_path)
            .and_then(|config| run_log(&config, &hostname, &action)),
        Command::View { period } => LoggerConfig::load(config_path)
            .and_then(|config| run_view(&config, period.as_deref())),
        Command::Verify { period } => LoggerConfig::load(config_path)
            .and_then(|config| run_verify(&config, period.as_deref())),
        Command::GenSalt => {
            println!("{}", generate_salt());
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn open_store(config: &LoggerConfig, period: Option<&str>) -> MlogResult<DualFormatStore> {
    let period = match period {
        Some(raw) => LogPeriod::parse(raw)?,
        None => LogPeriod::current(),
    };
    let paths = config.store_paths(&period);
    Ok(DualFormatStore::new(paths.structured, paths.tabular).with_profile(config.profile))
}

fn run_log(config: &LoggerConfig, hostname: &str, action: &str) -> MlogResult<ExitCode> {
    let action = if action == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| MlogError::Io {
                path: "<stdin>".to_string(),
                reason: e.to_string(),
            })?;
        buf
    } else {
        action.to_string()
    };

    let store = open_store(config, None)?;
    let builder = EntryBuilder::for_profile(
        Box::new(SessionIdentity::new()),
        Box::new(SystemClock),
        config.profile,
        config.digest_salt()?.cloned(),
    )?;

    let entry = builder.finalize(hostname, &action, &store)?;
    store.append(&entry)?;

    match entry.entry_id {
        Some(id) => println!("Action logged successfully! Log Entry ID: {}", id),
        None => println!("Action logged successfully!"),
    }
    Ok(ExitCode::SUCCESS)
}

fn run_view(config: &LoggerConfig, period: Option<&str>) -> MlogResult<ExitCode> {
    let store = open_store(config, period)?;
    let entries = store.load();

    if entries.is_empty() {
        println!("No log entries in {}.", store.location());
        return Ok(ExitCode::SUCCESS);
    }
    for entry in &entries {
        print_entry(entry);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_verify(config: &LoggerConfig, period: Option<&str>) -> MlogResult<ExitCode> {
    let store = open_store(config, period)?;
    let verifier = IntegrityVerifier::new(config.salt()?.clone());
    let report = verifier.verify_store(&store)?;

    for check in &report.checks {
        println!("{}", check);
        println!("{}", SEPARATOR);
    }
    println!("{}", report.summary());

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

const SEPARATOR: &str = "----------------------------------------";

fn print_entry(entry: &LogEntry) {
    if let Some(id) = entry.entry_id {
        println!("Log Entry ID: {}", id);
    }
    println!("Hostname: {}", entry.hostname);
    println!("Action Taken: {}", entry.action_taken);
    println!("Username: {}", entry.username);
    println!("Timestamp: {}", entry.timestamp);
    println!("{}", SEPARATOR);
}
