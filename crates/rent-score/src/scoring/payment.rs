use super::date::validate_date;
use super::domain::{AmountType, PaymentStatus, RentScoreError, TransactionScore};
use tracing::trace;

/// Highest score a single payment can earn, however much it overpays.
pub const MAX_TRANSACTION_SCORE: u8 = 10;

/// Maps the signed day gap (expected minus actual) onto the timeliness ladder.
pub fn status_for_gap(days_gap: i64) -> PaymentStatus {
    match days_gap {
        gap if gap > 0 => PaymentStatus::Early,
        0 => PaymentStatus::OnTime,
        -10..=-1 => PaymentStatus::Late,
        -15..=-11 => PaymentStatus::Late2,
        -20..=-16 => PaymentStatus::Late3,
        -30..=-21 => PaymentStatus::Arrears,
        _ => PaymentStatus::ExtendedArrears,
    }
}

pub fn classify_amount(amount_paid: f64, amount_owed: f64) -> AmountType {
    if amount_paid == amount_owed {
        AmountType::Full
    } else if amount_paid > amount_owed {
        AmountType::Extra
    } else {
        AmountType::Partial
    }
}

/// Scales the ladder score by the share of the owed amount covered.
///
/// The result is floored and held within `0..=10`: overpaying cannot beat a
/// perfect score and a negative owed amount (left by an earlier overpayment)
/// cannot push it below zero.
fn scaled_score(status: PaymentStatus, amount_paid: f64, amount_owed: f64) -> u8 {
    let scaled = f64::from(status.base_score()) * (amount_paid / amount_owed);
    scaled
        .min(f64::from(MAX_TRANSACTION_SCORE))
        .floor()
        .max(0.0) as u8
}

/// Scores one payment against its due date and the amount still outstanding.
///
/// `full_rent` is the base monthly rent and only feeds diagnostics; the score
/// is relative to `amount_owed`, which callers must keep non-zero.
pub fn score_payment(
    expected_date: &str,
    actual_date: &str,
    amount_paid: f64,
    full_rent: f64,
    amount_owed: f64,
) -> Result<TransactionScore, RentScoreError> {
    let date_expected = validate_date(expected_date)?;
    let date_received = validate_date(actual_date)?;

    if amount_owed == 0.0 {
        return Err(RentScoreError::ZeroAmountOwed {
            month: date_expected.format("%m/%Y").to_string(),
        });
    }

    let date_days_gap = (date_expected - date_received).num_days();
    let payment_status = status_for_gap(date_days_gap);
    let score = scaled_score(payment_status, amount_paid, amount_owed);
    let amount_type = classify_amount(amount_paid, amount_owed);

    trace!(
        %date_expected,
        %date_received,
        date_days_gap,
        amount_paid,
        amount_owed,
        full_rent,
        score,
        "scored payment"
    );

    Ok(TransactionScore {
        score,
        amount_paid,
        amount_type,
        payment_status,
        date_expected,
        date_received,
        date_days_gap,
    })
}
