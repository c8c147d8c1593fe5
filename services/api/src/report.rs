use crate::infra::bootstrap;
use clap::Args;
use rent_score::error::AppError;
use rent_score::income::{infer_monthly_income, LedgerImporter};
use rent_score::scoring::{generate_rent_score, PaymentImporter, RentScoreResult};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV export with expected_date, actual_date and amount_paid columns
    #[arg(long)]
    pub(crate) payments: PathBuf,
    /// Monthly rent (defaults to RENT_SCORE_DEFAULT_RENT)
    #[arg(long)]
    pub(crate) full_rent: Option<f64>,
    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct IncomeArgs {
    /// Statement CSV export with paid_in and completion_time columns
    #[arg(long)]
    pub(crate) ledger: PathBuf,
}

pub(crate) fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        payments,
        full_rent,
        json,
    } = args;

    let config = bootstrap()?;
    let full_rent = config
        .scoring
        .resolve_rent(full_rent)
        .ok_or(AppError::MissingRent)?;
    let records = PaymentImporter::from_path(&payments)?;
    let result = generate_rent_score(full_rent, &records)?;

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Rent score payload unavailable: {}", err),
        }
    } else {
        render_score_report(&result, full_rent, records.len());
    }

    Ok(())
}

pub(crate) fn run_income_report(args: IncomeArgs) -> Result<(), AppError> {
    bootstrap()?;
    let entries = LedgerImporter::from_path(&args.ledger)?;
    let average = infer_monthly_income(&entries);

    println!("Income inference");
    println!("- {} statement entries read", entries.len());
    println!("- Average monthly income: {:.2}", average);

    Ok(())
}

pub(crate) fn render_score_report(result: &RentScoreResult, full_rent: f64, payments: usize) {
    println!("Rent score report");
    println!(
        "Monthly rent {:.2} | {} payments across {} obligation months",
        full_rent,
        payments,
        result.months().len()
    );

    println!("\nMonthly breakdown");
    for month in result.months() {
        let label = month
            .transactions
            .first()
            .map(|transaction| transaction.date_expected.format("%B %Y").to_string())
            .unwrap_or_else(|| "Unscheduled".to_string());
        println!(
            "- {}: score {} | expected {:.2} | paid {:.2} | balance {:.2}",
            label, month.score, month.total_expected, month.total_paid, month.total_balance
        );
        for transaction in &month.transactions {
            println!(
                "    - received {} ({} days) {:.2} {} {} -> {}",
                transaction.date_received,
                transaction.date_days_gap,
                transaction.amount_paid,
                transaction.amount_type,
                transaction.payment_status,
                transaction.score
            );
        }
    }

    let balance = result.closing_balance();
    if balance > 0.0 {
        println!("\nOutstanding balance: {:.2}", balance);
    } else {
        println!("\nOutstanding balance: none");
    }
    println!("Total score: {}", result.total_score);
}
