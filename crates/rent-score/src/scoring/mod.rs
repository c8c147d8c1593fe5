//! Rent payment scoring.
//!
//! Payments are bucketed into obligation months by their expected date, each
//! month is scored payment by payment against what is still owed, and unpaid
//! balances roll into the next month's obligation.

mod date;
pub mod domain;
pub mod import;
mod month;
mod payment;

pub use date::validate_date;
pub use domain::{
    AmountType, MonthSummary, PaymentRecord, PaymentStatus, RentScoreError, RentScoreResult,
    TransactionScore,
};
pub use import::{PaymentImportError, PaymentImporter};
pub use month::{group_by_obligation_month, summarize_month, ObligationMonth};
pub use payment::{classify_amount, score_payment, status_for_gap, MAX_TRANSACTION_SCORE};

use tracing::{debug, info};

/// Amount owed entering the month after one that closed with `balance`.
///
/// A settled month resets the obligation to the base rent; anything else,
/// shortfall or surplus, is carried on top of it.
pub fn carry_forward(full_rent: f64, balance: f64) -> f64 {
    if balance == 0.0 {
        full_rent
    } else {
        balance + full_rent
    }
}

struct CarryState {
    owed_entering: f64,
    total_score: u32,
    months: Vec<MonthSummary>,
}

/// Scores a tenant's payment history against a fixed monthly rent.
///
/// Fails on the first invalid row; no partial result is produced.
pub fn generate_rent_score(
    full_rent: f64,
    payments: &[PaymentRecord],
) -> Result<RentScoreResult, RentScoreError> {
    if !full_rent.is_finite() || full_rent <= 0.0 {
        return Err(RentScoreError::InvalidRent { value: full_rent });
    }

    let grouped = group_by_obligation_month(payments)?;

    let initial = CarryState {
        owed_entering: full_rent,
        total_score: 0,
        months: Vec::with_capacity(grouped.len()),
    };

    let state = grouped.iter().try_fold(initial, |mut state, month| {
        let summary = summarize_month(state.owed_entering, &month.records, full_rent)?;
        debug!(
            month = %month.key,
            score = summary.score,
            total_expected = summary.total_expected,
            total_paid = summary.total_paid,
            total_balance = summary.total_balance,
            "summarized obligation month"
        );

        state.owed_entering = carry_forward(full_rent, summary.total_balance);
        state.total_score += summary.score;
        state.months.push(summary);
        Ok::<_, RentScoreError>(state)
    })?;

    info!(
        months = state.months.len(),
        payments = payments.len(),
        total_score = state.total_score,
        "rent score generated"
    );

    Ok(RentScoreResult {
        total_score: state.total_score,
        transactions: state.months,
    })
}
