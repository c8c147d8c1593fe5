use super::domain::RentScoreError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const DATE_PATTERN: &str = r"^(0[1-9]|1[0-2])/(0[1-9]|[12][0-9]|3[01])/\d{4}$";

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(DATE_PATTERN).expect("date pattern compiles"))
}

/// Decodes a strict `MM/DD/YYYY` date.
///
/// Text that does not match the pattern is an [`RentScoreError::InvalidDateFormat`];
/// text that matches but names a day the calendar lacks (`02/30/2022`) is an
/// [`RentScoreError::InvalidDate`].
pub fn validate_date(value: &str) -> Result<NaiveDate, RentScoreError> {
    if !date_pattern().is_match(value) {
        return Err(RentScoreError::InvalidDateFormat {
            value: value.to_string(),
        });
    }

    NaiveDate::parse_from_str(value, "%m/%d/%Y").map_err(|_| RentScoreError::InvalidDate {
        value: value.to_string(),
    })
}
