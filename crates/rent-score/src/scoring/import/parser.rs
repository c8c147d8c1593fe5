use super::super::domain::PaymentRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<PaymentRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<PaymentRow>() {
        let row = record?;
        records.push(PaymentRecord {
            expected_date: row.expected_date,
            actual_date: row.actual_date,
            amount_paid: row.amount_paid,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct PaymentRow {
    #[serde(alias = "Expected Date")]
    expected_date: String,
    #[serde(alias = "Actual Date")]
    actual_date: String,
    #[serde(alias = "Amount Paid", deserialize_with = "amount_without_separators")]
    amount_paid: f64,
}

fn amount_without_separators<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let cleaned = raw.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .map_err(|_| serde::de::Error::custom(format!("'{raw}' is not a valid amount")))
}
