//! Parameter constraint checks
//!
//! Every check names the offending parameter so the caller gets a
//! [`Error::Validation`](uw_core::Error::Validation) before any request is
//! sent. Absent optional values always pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;
use uw_core::{Error, Result};

static TICKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\^?[A-Za-z0-9][A-Za-z0-9./-]{0,14}$").ok());

/// A closed set of string values accepted by the API
pub trait WireEnum: Copy + 'static {
    const ALL: &'static [Self];

    /// Value as sent on the wire
    fn as_str(self) -> &'static str;

    fn parse_wire(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }

    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|v| format!("'{}'", v.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn non_negative<T>(param: &str, value: Option<T>) -> Result<()>
where
    T: PartialOrd + Default + Display + Copy,
{
    match value {
        Some(v) if v < T::default() => Err(Error::validation(
            param,
            format!("must be non-negative, got {v}"),
        )),
        _ => Ok(()),
    }
}

pub fn finite(param: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(Error::validation(param, "must be a finite number")),
        _ => Ok(()),
    }
}

/// Check an inclusive range, used for page sizes
pub fn in_range(param: &str, value: Option<i64>, min: i64, max: i64) -> Result<()> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(Error::validation(
            param,
            format!("must be between {min} and {max}, got {v}"),
        )),
        _ => Ok(()),
    }
}

pub fn non_empty(param: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.trim().is_empty() => Err(Error::validation(param, "must not be empty")),
        _ => Ok(()),
    }
}

/// Check a value that becomes one URL path segment
///
/// `.` and `..` are dropped by URL path normalisation, so they would address
/// a different resource.
pub fn path_segment(param: &str, value: &str) -> Result<()> {
    match value.trim() {
        "" => Err(Error::validation(param, "must not be empty")),
        "." | ".." => Err(Error::validation(
            param,
            format!("'{}' is not a valid path segment", value.trim()),
        )),
        _ => Ok(()),
    }
}

/// Check every element of a list filter is non-empty
pub fn each_non_empty(param: &str, values: Option<&[String]>) -> Result<()> {
    for value in values.unwrap_or_default() {
        non_empty(param, Some(value))?;
    }
    Ok(())
}

/// Validate a ticker symbol and return it upper-cased
pub fn ticker(param: &str, value: &str) -> Result<String> {
    let symbol = value.trim();
    let valid = TICKER.as_ref().is_some_and(|re| re.is_match(symbol));
    if valid {
        Ok(symbol.to_ascii_uppercase())
    } else {
        Err(Error::validation(
            param,
            format!("'{value}' is not a valid ticker symbol"),
        ))
    }
}

pub fn optional_ticker(param: &str, value: Option<&str>) -> Result<Option<String>> {
    value.map(|v| ticker(param, v)).transpose()
}

/// Check a calendar date in `YYYY-MM-DD` form
pub fn date(param: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if NaiveDate::parse_from_str(v, "%Y-%m-%d").is_err() => Err(Error::validation(
            param,
            format!("'{v}' is not a date in YYYY-MM-DD format"),
        )),
        _ => Ok(()),
    }
}

/// Check an ISO-8601 date or timestamp
pub fn iso8601(param: &str, value: Option<&str>) -> Result<()> {
    let Some(v) = value else {
        return Ok(());
    };

    let valid = NaiveDate::parse_from_str(v, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(v).is_ok()
        || NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S%.f").is_ok();
    if valid {
        Ok(())
    } else {
        Err(Error::validation(
            param,
            format!("'{v}' is not an ISO-8601 date or timestamp"),
        ))
    }
}

pub fn one_of<E: WireEnum>(param: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if E::parse_wire(v).is_none() => Err(Error::validation(
            param,
            format!("'{v}' is not one of {}", E::expected()),
        )),
        _ => Ok(()),
    }
}

pub fn each_one_of<E: WireEnum>(param: &str, values: Option<&[String]>) -> Result<()> {
    for value in values.unwrap_or_default() {
        one_of::<E>(param, Some(value))?;
    }
    Ok(())
}

/// Check every element is a single ASCII letter
pub fn each_letter(param: &str, values: Option<&[String]>) -> Result<()> {
    for value in values.unwrap_or_default() {
        let mut chars = value.chars();
        let single = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic());
        if !single {
            return Err(Error::validation(
                param,
                format!("'{value}' is not a single-letter code"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Side {
        Asc,
        Desc,
    }

    impl WireEnum for Side {
        const ALL: &'static [Self] = &[Self::Asc, Self::Desc];

        fn as_str(self) -> &'static str {
            match self {
                Self::Asc => "asc",
                Self::Desc => "desc",
            }
        }
    }

    #[test]
    fn test_numeric_checks() {
        assert!(non_negative("min_premium", Some(0)).is_ok());
        assert!(non_negative::<i64>("min_premium", None).is_ok());
        let err = non_negative("min_premium", Some(-1)).unwrap_err();
        assert_eq!(err.param(), Some("min_premium"));

        assert!(non_negative("min_price", Some(-0.5)).is_err());
        assert!(finite("min_diff", Some(-3.2)).is_ok());
        assert!(finite("min_diff", Some(f64::NAN)).is_err());
        assert!(finite("min_diff", Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_in_range() {
        assert!(in_range("limit", Some(1), 1, 200).is_ok());
        assert!(in_range("limit", Some(200), 1, 200).is_ok());
        assert!(in_range("limit", None, 1, 200).is_ok());

        let err = in_range("limit", Some(201), 1, 200).unwrap_err();
        assert_eq!(err.param(), Some("limit"));
        assert!(err.to_string().contains("between 1 and 200"));
        assert!(in_range("limit", Some(0), 1, 200).is_err());
    }

    #[test]
    fn test_ticker() {
        assert_eq!(ticker("ticker", "aapl").unwrap(), "AAPL");
        assert_eq!(ticker("ticker", " BRK.B ").unwrap(), "BRK.B");
        assert_eq!(ticker("ticker", "^SPX").unwrap(), "^SPX");
        assert!(ticker("ticker", "").is_err());
        assert!(ticker("ticker", "AA PL").is_err());
        assert!(ticker("ticker", "../etc").is_err());
        assert!(ticker("ticker", "ABCDEFGHIJKLMNOPQ").is_err());
        assert_eq!(optional_ticker("ticker", None).unwrap(), None);
    }

    #[test]
    fn test_dates() {
        assert!(date("date", Some("2024-01-31")).is_ok());
        assert!(date("date", Some("2024-02-30")).is_err());
        assert!(date("date", Some("01/31/2024")).is_err());

        assert!(iso8601("newer_than", Some("2024-01-31")).is_ok());
        assert!(iso8601("newer_than", Some("2024-01-31T14:30:00Z")).is_ok());
        assert!(iso8601("newer_than", Some("2024-01-31T14:30:00")).is_ok());
        assert!(iso8601("newer_than", Some("yesterday")).is_err());
    }

    #[test]
    fn test_enum_checks() {
        assert!(one_of::<Side>("order_direction", Some("asc")).is_ok());
        let err = one_of::<Side>("order_direction", Some("up")).unwrap_err();
        assert_eq!(err.param(), Some("order_direction"));
        assert!(err.to_string().contains("'asc', 'desc'"));

        let values = vec!["asc".to_string(), "sideways".to_string()];
        assert!(each_one_of::<Side>("dirs", Some(values.as_slice())).is_err());
        assert_eq!(Side::parse_wire("desc"), Some(Side::Desc));
    }

    #[test]
    fn test_list_checks() {
        let ok = vec!["P".to_string(), "s".to_string()];
        assert!(each_letter("transaction_codes", Some(ok.as_slice())).is_ok());

        let bad = vec!["PS".to_string()];
        assert!(each_letter("transaction_codes", Some(bad.as_slice())).is_err());

        let blank = vec!["Share".to_string(), " ".to_string()];
        assert!(each_non_empty("security_types", Some(blank.as_slice())).is_err());
        assert!(non_empty("name", Some("")).is_err());
    }

    #[test]
    fn test_path_segment() {
        assert!(path_segment("name", "VANGUARD GROUP INC").is_ok());
        assert!(path_segment("name", "0000102909").is_ok());
        assert!(path_segment("name", "...").is_ok());
        for bad in ["", "  ", ".", "..", " .. "] {
            let err = path_segment("name", bad).unwrap_err();
            assert_eq!(err.param(), Some("name"));
        }
    }
}
