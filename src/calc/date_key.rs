use chrono::NaiveDate;
use thiserror::Error;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum DateKeyError {
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    Malformed(String),
}

/// Store key for a local calendar date, e.g. `2024-03-15`.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` key back into a date. Only the exact key layout is
/// accepted (zero-padded, no surrounding whitespace).
pub fn parse_date_key(key: &str) -> Result<NaiveDate, DateKeyError> {
    if key.len() != 10 {
        return Err(DateKeyError::Malformed(key.to_string()));
    }
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .map_err(|_| DateKeyError::Malformed(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_date_key_zero_pads() {
        assert_eq!(date_key(d(2024, 3, 5)), "2024-03-05");
        assert_eq!(date_key(d(2024, 12, 31)), "2024-12-31");
    }

    #[test]
    fn test_date_key_is_stable() {
        let date = d(2025, 1, 1);
        assert_eq!(date_key(date), date_key(date));
    }

    #[test]
    fn test_parse_date_key_roundtrip() {
        let date = d(2024, 2, 29);
        assert_eq!(parse_date_key(&date_key(date)).unwrap(), date);
    }

    #[test]
    fn test_parse_date_key_rejects_unpadded() {
        assert!(parse_date_key("2024-3-5").is_err());
    }

    #[test]
    fn test_parse_date_key_rejects_invalid_day() {
        assert_eq!(
            parse_date_key("2023-02-29"),
            Err(DateKeyError::Malformed("2023-02-29".to_string()))
        );
    }

    #[test]
    fn test_parse_date_key_rejects_garbage() {
        assert!(parse_date_key("tomorrow").is_err());
        assert!(parse_date_key("").is_err());
    }
}
