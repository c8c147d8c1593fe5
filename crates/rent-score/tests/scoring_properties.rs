use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rent_score::scoring::{
    generate_rent_score, score_payment, PaymentRecord, RentScoreError, MAX_TRANSACTION_SCORE,
};

fn date_text(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn payment_strategy() -> impl Strategy<Value = PaymentRecord> {
    (1u32..=12, 1u32..=28, -15i64..=60, 0u32..=3000).prop_map(|(month, day, delay, amount)| {
        let expected = NaiveDate::from_ymd_opt(2022, month, day).expect("valid generated date");
        let actual = expected + Duration::days(delay);
        PaymentRecord::new(date_text(expected), date_text(actual), f64::from(amount))
    })
}

proptest! {
    #[test]
    fn transaction_scores_stay_in_range(
        delay in -40i64..=120,
        paid in 0u32..=10_000,
        owed in 1u32..=10_000,
    ) {
        let expected = NaiveDate::from_ymd_opt(2022, 6, 1).expect("valid date");
        let actual = expected + Duration::days(delay);
        let outcome = score_payment(
            &date_text(expected),
            &date_text(actual),
            f64::from(paid),
            1000.0,
            f64::from(owed),
        )
        .expect("valid inputs score");

        prop_assert!(outcome.score <= MAX_TRANSACTION_SCORE);
        prop_assert_eq!(outcome.date_days_gap, -delay);
    }

    #[test]
    fn totals_match_and_runs_are_repeatable(
        payments in prop::collection::vec(payment_strategy(), 0..24),
        rent in 100u32..=3000,
    ) {
        let rent = f64::from(rent);
        let first = generate_rent_score(rent, &payments);
        let second = generate_rent_score(rent, &payments);
        prop_assert_eq!(&first, &second);

        match first {
            Ok(result) => {
                let mut total = 0u32;
                for month in result.months() {
                    let mut month_total = 0u32;
                    for transaction in &month.transactions {
                        prop_assert!(transaction.score <= MAX_TRANSACTION_SCORE);
                        month_total += u32::from(transaction.score);
                    }
                    prop_assert_eq!(month.score, month_total);
                    total += month.score;
                }
                prop_assert_eq!(result.total_score, total);
            }
            Err(RentScoreError::ZeroAmountOwed { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
