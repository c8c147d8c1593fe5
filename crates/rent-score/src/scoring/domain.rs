use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw payment row as handed over by the ingestion layer.
///
/// Dates stay textual until they pass through [`super::validate_date`], so a
/// malformed export surfaces as a scoring error rather than a parse panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub expected_date: String,
    pub actual_date: String,
    pub amount_paid: f64,
}

impl PaymentRecord {
    pub fn new(
        expected_date: impl Into<String>,
        actual_date: impl Into<String>,
        amount_paid: f64,
    ) -> Self {
        Self {
            expected_date: expected_date.into(),
            actual_date: actual_date.into(),
            amount_paid,
        }
    }
}

/// How a single payment compares with what was still owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountType {
    Full,
    Extra,
    Partial,
}

impl AmountType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Extra => "extra",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for AmountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Timeliness bucket derived from the signed day gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "early")]
    Early,
    #[serde(rename = "on-time")]
    OnTime,
    #[serde(rename = "late")]
    Late,
    #[serde(rename = "late-2")]
    Late2,
    #[serde(rename = "late-3")]
    Late3,
    #[serde(rename = "arrears")]
    Arrears,
    #[serde(rename = "extended-arrears")]
    ExtendedArrears,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::OnTime => "on-time",
            Self::Late => "late",
            Self::Late2 => "late-2",
            Self::Late3 => "late-3",
            Self::Arrears => "arrears",
            Self::ExtendedArrears => "extended-arrears",
        }
    }

    /// Score awarded before scaling by the share of the owed amount paid.
    pub const fn base_score(self) -> u8 {
        match self {
            Self::Early | Self::OnTime => 10,
            Self::Late => 8,
            Self::Late2 => 6,
            Self::Late3 => 5,
            Self::Arrears => 3,
            Self::ExtendedArrears => 0,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of scoring one payment against one due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionScore {
    pub score: u8,
    pub amount_paid: f64,
    pub amount_type: AmountType,
    pub payment_status: PaymentStatus,
    pub date_expected: NaiveDate,
    pub date_received: NaiveDate,
    pub date_days_gap: i64,
}

/// Accounting for one obligation month.
///
/// `total_expected` is what was owed when the month began (rent plus any
/// carried balance), not the base rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub score: u32,
    pub total_paid: f64,
    pub total_expected: f64,
    pub total_balance: f64,
    pub transactions: Vec<TransactionScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentScoreResult {
    pub total_score: u32,
    pub transactions: Vec<MonthSummary>,
}

impl RentScoreResult {
    pub fn months(&self) -> &[MonthSummary] {
        &self.transactions
    }

    /// Balance left unpaid after the last obligation month, if any.
    pub fn closing_balance(&self) -> f64 {
        self.transactions
            .last()
            .map(|month| month.total_balance)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RentScoreError {
    #[error("the date '{value}' is not in the MM/DD/YYYY format")]
    InvalidDateFormat { value: String },
    #[error("the date '{value}' is not a valid date")]
    InvalidDate { value: String },
    #[error("nothing is owed for {month}; a payment cannot be scored against a zero balance")]
    ZeroAmountOwed { month: String },
    #[error("full rent must be a positive amount, got {value}")]
    InvalidRent { value: f64 },
    #[error("row {row}: amount paid must be a non-negative amount, got {value}")]
    InvalidAmount { row: usize, value: f64 },
}
