mod parser;

use super::domain::PaymentRecord;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum PaymentImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for PaymentImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentImportError::Io(err) => write!(f, "failed to read payment export: {}", err),
            PaymentImportError::Csv(err) => write!(f, "invalid payment CSV data: {}", err),
        }
    }
}

impl std::error::Error for PaymentImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaymentImportError::Io(err) => Some(err),
            PaymentImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for PaymentImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for PaymentImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads `expected_date,actual_date,amount_paid` exports into payment rows.
///
/// Dates are kept as text; they are checked when the rows are scored.
pub struct PaymentImporter;

impl PaymentImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PaymentRecord>, PaymentImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PaymentRecord>, PaymentImportError> {
        Ok(parser::parse_records(reader)?)
    }
}
