//! Average monthly income inferred from a mobile-money statement.

mod parser;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One statement line. `paid_in` is `None` for withdrawals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub paid_in: Option<f64>,
    pub completion_time: NaiveDateTime,
}

#[derive(Debug, thiserror::Error)]
pub enum IncomeError {
    #[error("failed to read ledger export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid ledger CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: paid in value '{value}' is not a valid amount")]
    InvalidAmount { row: usize, value: String },
    #[error("row {row}: completion time '{value}' is not a recognised timestamp")]
    InvalidTimestamp { row: usize, value: String },
}

/// Total deposits divided by the number of distinct months in the ledger.
///
/// Months are told apart by month of year only, so a statement spanning more
/// than twelve months folds the same month of different years together. An
/// empty ledger yields zero.
pub fn infer_monthly_income(entries: &[LedgerEntry]) -> f64 {
    let total_income: f64 = entries
        .iter()
        .map(|entry| entry.paid_in.unwrap_or(0.0))
        .sum();
    let months: BTreeSet<u32> = entries
        .iter()
        .map(|entry| entry.completion_time.month())
        .collect();

    debug!(
        entries = entries.len(),
        months = months.len(),
        total_income,
        "inferred monthly income"
    );

    if months.is_empty() {
        total_income
    } else {
        total_income / months.len() as f64
    }
}

/// Reads `paid_in,completion_time` statement exports.
pub struct LedgerImporter;

impl LedgerImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LedgerEntry>, IncomeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LedgerEntry>, IncomeError> {
        parser::parse_entries(reader)
    }
}
