//! Logging periods and the file names derived from them.
//!
//! Each calendar month gets its own pair of files, named after the
//! upper-case month abbreviation and the year, e.g.
//! `MAR_2024_maintenance_log.json` and `MAR_2024_maintenance_log.csv`.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

use mlog_contracts::{MlogError, MlogResult};

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

const FILE_SUFFIX: &str = "maintenance_log";

/// A calendar month that owns one structured store and one tabular export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogPeriod {
    year: i32,
    /// 1-based month number.
    month: u32,
}

impl LogPeriod {
    pub fn new(year: i32, month: u32) -> MlogResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(MlogError::Config {
                reason: format!("month {month} is out of range 1..=12"),
            });
        }
        Ok(Self { year, month })
    }

    /// The period containing the current local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse the `MON_YYYY` form used in file names (case-insensitive).
    pub fn parse(s: &str) -> MlogResult<Self> {
        let invalid = || MlogError::Config {
            reason: format!("invalid log period '{s}', expected e.g. MAR_2024"),
        };

        let (mon, year) = s.trim().split_once('_').ok_or_else(invalid)?;
        let month = MONTHS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(mon))
            .ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        Self::new(year, month as u32 + 1)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn structured_file_name(&self) -> String {
        format!("{}_{}.json", self, FILE_SUFFIX)
    }

    pub fn tabular_file_name(&self) -> String {
        format!("{}_{}.csv", self, FILE_SUFFIX)
    }
}

impl fmt::Display for LogPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", MONTHS[(self.month - 1) as usize], self.year)
    }
}
