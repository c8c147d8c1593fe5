use super::date::validate_date;
use super::domain::{MonthSummary, PaymentRecord, RentScoreError, TransactionScore};
use super::payment::score_payment;
use std::collections::HashMap;

/// Payments sharing the month/year of their expected date.
#[derive(Debug, Clone, PartialEq)]
pub struct ObligationMonth<'a> {
    /// `MM/YYYY` of the expected date.
    pub key: String,
    pub records: Vec<&'a PaymentRecord>,
}

/// Buckets payments by obligation month.
///
/// Buckets come back in the order their month is first seen in `records`, not
/// in calendar order, and rows keep their input order inside a bucket. Every
/// row is validated here so the first bad row in input order is the one
/// reported.
pub fn group_by_obligation_month(
    records: &[PaymentRecord],
) -> Result<Vec<ObligationMonth<'_>>, RentScoreError> {
    let mut months: Vec<ObligationMonth<'_>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (row, record) in records.iter().enumerate() {
        let expected = validate_date(&record.expected_date)?;
        validate_date(&record.actual_date)?;
        if !record.amount_paid.is_finite() || record.amount_paid < 0.0 {
            return Err(RentScoreError::InvalidAmount {
                row,
                value: record.amount_paid,
            });
        }

        let key = expected.format("%m/%Y").to_string();
        match positions.get(&key) {
            Some(&index) => months[index].records.push(record),
            None => {
                positions.insert(key.clone(), months.len());
                months.push(ObligationMonth {
                    key,
                    records: vec![record],
                });
            }
        }
    }

    Ok(months)
}

/// Running totals threaded through a month's payments.
#[derive(Debug, Clone)]
struct MonthState {
    remaining_owed: f64,
    score: u32,
    total_paid: f64,
    transactions: Vec<TransactionScore>,
}

impl MonthState {
    fn opening(amount_owed: f64, capacity: usize) -> Self {
        Self {
            remaining_owed: amount_owed,
            score: 0,
            total_paid: 0.0,
            transactions: Vec::with_capacity(capacity),
        }
    }

    fn apply(mut self, scored: TransactionScore) -> Self {
        self.score += u32::from(scored.score);
        self.total_paid += scored.amount_paid;
        self.remaining_owed -= scored.amount_paid;
        self.transactions.push(scored);
        self
    }
}

/// Scores one month's payments in order, each against what is still owed
/// after the payments before it.
///
/// An empty month never reaches the scorer and simply reports its opening
/// amount as the balance.
pub fn summarize_month(
    amount_owed_at_start: f64,
    records: &[&PaymentRecord],
    full_rent: f64,
) -> Result<MonthSummary, RentScoreError> {
    let state = records.iter().try_fold(
        MonthState::opening(amount_owed_at_start, records.len()),
        |state, record| {
            let scored = score_payment(
                &record.expected_date,
                &record.actual_date,
                record.amount_paid,
                full_rent,
                state.remaining_owed,
            )?;
            Ok::<_, RentScoreError>(state.apply(scored))
        },
    )?;

    Ok(MonthSummary {
        score: state.score,
        total_paid: state.total_paid,
        total_expected: amount_owed_at_start,
        total_balance: amount_owed_at_start - state.total_paid,
        transactions: state.transactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::{AmountType, PaymentStatus};

    fn record(expected: &str, actual: &str, amount: f64) -> PaymentRecord {
        PaymentRecord::new(expected, actual, amount)
    }

    #[test]
    fn groups_by_expected_month_in_first_seen_order() {
        let records = vec![
            record("03/01/2022", "03/01/2022", 500.0),
            record("01/01/2022", "01/02/2022", 1000.0),
            record("03/01/2022", "04/05/2022", 500.0),
            record("01/01/2023", "01/01/2023", 1000.0),
        ];

        let months = group_by_obligation_month(&records).expect("groups");

        let keys: Vec<&str> = months.iter().map(|month| month.key.as_str()).collect();
        assert_eq!(keys, ["03/2022", "01/2022", "01/2023"]);
        assert_eq!(months[0].records.len(), 2);
        assert_eq!(months[0].records[1].actual_date, "04/05/2022");
    }

    #[test]
    fn late_payment_stays_with_its_obligation_month() {
        let records = vec![record("01/01/2022", "02/20/2022", 1000.0)];

        let months = group_by_obligation_month(&records).expect("groups");

        assert_eq!(months.len(), 1);
        assert_eq!(months[0].key, "01/2022");
    }

    #[test]
    fn grouping_reports_first_invalid_row() {
        let records = vec![
            record("01/01/2022", "01/01/2022", 1000.0),
            record("02/01/2022", "02/30/2022", 1000.0),
            record("13/01/2022", "03/01/2022", 1000.0),
        ];

        let error = group_by_obligation_month(&records).expect_err("invalid row");
        assert_eq!(
            error,
            RentScoreError::InvalidDate {
                value: "02/30/2022".to_string()
            }
        );
    }

    #[test]
    fn grouping_rejects_negative_amounts() {
        let records = vec![
            record("01/01/2022", "01/01/2022", 1000.0),
            record("02/01/2022", "02/01/2022", -5.0),
        ];

        match group_by_obligation_month(&records) {
            Err(RentScoreError::InvalidAmount { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, -5.0);
            }
            other => panic!("expected invalid amount, got {other:?}"),
        }
    }

    #[test]
    fn successive_payments_score_against_remaining_balance() {
        let first = record("01/01/2022", "01/01/2022", 500.0);
        let second = record("01/01/2022", "01/05/2022", 500.0);

        let summary = summarize_month(1000.0, &[&first, &second], 1000.0).expect("summarizes");

        // 10 * 500/1000 = 5, then 8 * 500/500 = 8
        assert_eq!(summary.transactions[0].score, 5);
        assert_eq!(summary.transactions[0].amount_type, AmountType::Partial);
        assert_eq!(summary.transactions[1].score, 8);
        assert_eq!(summary.transactions[1].amount_type, AmountType::Full);
        assert_eq!(summary.transactions[1].payment_status, PaymentStatus::Late);
        assert_eq!(summary.score, 13);
        assert_eq!(summary.total_paid, 1000.0);
        assert_eq!(summary.total_expected, 1000.0);
        assert_eq!(summary.total_balance, 0.0);
    }

    #[test]
    fn balance_is_measured_from_opening_amount() {
        let only = record("02/01/2022", "02/01/2022", 1500.0);

        let summary = summarize_month(2500.0, &[&only], 2000.0).expect("summarizes");

        assert_eq!(summary.total_expected, 2500.0);
        assert_eq!(summary.total_balance, 1000.0);
        // 10 * 1500/2500 = 6
        assert_eq!(summary.score, 6);
    }

    #[test]
    fn empty_month_skips_scoring() {
        let summary = summarize_month(0.0, &[], 1000.0).expect("empty month");

        assert_eq!(summary.score, 0);
        assert_eq!(summary.total_paid, 0.0);
        assert_eq!(summary.total_balance, 0.0);
        assert!(summary.transactions.is_empty());
    }

    #[test]
    fn payment_after_settling_the_month_fails_fast() {
        let settle = record("01/01/2022", "01/01/2022", 1000.0);
        let extra = record("01/01/2022", "01/10/2022", 100.0);

        let error = summarize_month(1000.0, &[&settle, &extra], 1000.0)
            .expect_err("zero owed rejected");

        assert_eq!(
            error,
            RentScoreError::ZeroAmountOwed {
                month: "01/2022".to_string()
            }
        );
    }
}
