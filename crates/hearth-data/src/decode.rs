//! Shared CSV decoding helpers.

use chrono::NaiveDate;

use crate::error::{DataError, Result};

/// Wrap a csv decoding failure with the name of the source it came from.
pub(crate) fn format_error(name: &str, err: csv::Error) -> DataError {
    DataError::SourceFormat {
        name: name.to_string(),
        reason: err.to_string(),
    }
}

/// Parse a calendar date, accepting the ISO form first and the US slash
/// form as a fallback.
pub(crate) fn parse_date(name: &str, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .map_err(|_| DataError::SourceFormat {
            name: name.to_string(),
            reason: format!("invalid date `{s}`"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_and_slash_dates() {
        let iso = parse_date("t.csv", "2023-01-31").unwrap();
        let slash = parse_date("t.csv", "01/31/2023").unwrap();
        assert_eq!(iso, slash);
        assert_eq!(iso, NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());
    }

    #[test]
    fn rejects_garbage_dates() {
        let err = parse_date("t.csv", "Jan 31").unwrap_err();
        assert!(err.to_string().contains("t.csv"));
    }
}
