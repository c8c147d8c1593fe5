use super::{IncomeError, LedgerEntry};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_entries<R: Read>(reader: R) -> Result<Vec<LedgerEntry>, IncomeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut entries = Vec::new();

    for (row, record) in csv_reader.deserialize::<LedgerRow>().enumerate() {
        let raw = record?;
        let paid_in = raw
            .paid_in
            .as_deref()
            .map(|value| parse_amount(value).ok_or_else(|| IncomeError::InvalidAmount {
                row,
                value: value.to_string(),
            }))
            .transpose()?;
        let completion_time = parse_datetime(&raw.completion_time).ok_or_else(|| {
            IncomeError::InvalidTimestamp {
                row,
                value: raw.completion_time.clone(),
            }
        })?;

        entries.push(LedgerEntry {
            paid_in,
            completion_time,
        });
    }

    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(
        alias = "Paid In",
        alias = "Paid in",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    paid_in: Option<String>,
    #[serde(alias = "Completion Time")]
    completion_time: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_datetime_supports_statement_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 5, 1)
            .unwrap()
            .and_hms_opt(14, 22, 10)
            .unwrap();
        assert_eq!(parse_datetime("2023-05-01 14:22:10"), Some(expected));
        assert_eq!(parse_datetime("2023-05-01T14:22:10Z"), Some(expected));
        assert_eq!(
            parse_datetime("2023-05-01"),
            NaiveDate::from_ymd_opt(2023, 5, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert!(parse_datetime("  ").is_none());
        assert!(parse_datetime("01/05/2023").is_none());
    }

    #[test]
    fn parse_amount_strips_thousands_separators() {
        assert_eq!(parse_amount("12,500.00"), Some(12500.0));
        assert_eq!(parse_amount(" 300 "), Some(300.0));
        assert_eq!(parse_amount("n/a"), None);
    }
}
