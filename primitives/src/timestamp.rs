use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A parsed `:timestamp` path segment.
///
/// The segment is either a single Unix-milliseconds value for an exact
/// match, or a dash-separated range where either bound may be omitted:
/// `"1500-"` means at least 1500, `"-1500"` at most 1500 and
/// `"1000-2000"` an inclusive range. The segment is split at the first
/// dash, so any second dash makes the upper bound malformed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFilter {
    Exact(i64),
    AtLeast(i64),
    AtMost(i64),
    Between(i64, i64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("timestamp range requires at least one bound")]
    EmptyBounds,
    #[error("invalid timestamp value: {0}")]
    InvalidNumber(String),
}

fn parse_millis(value: &str) -> Result<i64, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

impl FromStr for TimestampFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            None => Ok(Self::Exact(parse_millis(s.trim())?)),
            Some((lower, upper)) => match (lower.trim(), upper.trim()) {
                ("", "") => Err(ParseError::EmptyBounds),
                ("", upper) => Ok(Self::AtMost(parse_millis(upper)?)),
                (lower, "") => Ok(Self::AtLeast(parse_millis(lower)?)),
                (lower, upper) => Ok(Self::Between(parse_millis(lower)?, parse_millis(upper)?)),
            },
        }
    }
}

impl TimestampFilter {
    /// Parses an optional path parameter, treating a missing or blank
    /// segment as "no filter".
    pub fn from_param(param: Option<&str>) -> Result<Option<Self>, ParseError> {
        match param.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_exact_value() {
        assert_eq!(Ok(TimestampFilter::Exact(1500)), "1500".parse());
        assert_eq!(Ok(TimestampFilter::Exact(1500)), " 1500 ".parse());
    }

    #[test]
    fn parses_open_and_closed_ranges() {
        assert_eq!(Ok(TimestampFilter::AtLeast(1500)), "1500-".parse());
        assert_eq!(Ok(TimestampFilter::AtMost(1500)), "-1500".parse());
        assert_eq!(Ok(TimestampFilter::Between(1000, 2000)), "1000-2000".parse());
        assert_eq!(Ok(TimestampFilter::Between(1000, 2000)), "1000 - 2000".parse());
    }

    #[test]
    fn rejects_empty_bounds() {
        assert_eq!(
            Err(ParseError::EmptyBounds),
            "-".parse::<TimestampFilter>()
        );
        assert_eq!(
            Err(ParseError::EmptyBounds),
            " - ".parse::<TimestampFilter>()
        );
    }

    #[test]
    fn rejects_non_numeric_bounds() {
        assert_eq!(
            Err(ParseError::InvalidNumber("abc".to_string())),
            "abc".parse::<TimestampFilter>()
        );
        assert_eq!(
            Err(ParseError::InvalidNumber("x".to_string())),
            "x-2000".parse::<TimestampFilter>()
        );
        // splitting happens at the first dash only
        assert_eq!(
            Err(ParseError::InvalidNumber("7-9".to_string())),
            "3-7-9".parse::<TimestampFilter>()
        );
    }

    #[test]
    fn from_param_treats_blank_as_no_filter() {
        assert_eq!(Ok(None), TimestampFilter::from_param(None));
        assert_eq!(Ok(None), TimestampFilter::from_param(Some("")));
        assert_eq!(Ok(None), TimestampFilter::from_param(Some("   ")));
        assert_eq!(
            Ok(Some(TimestampFilter::Exact(42))),
            TimestampFilter::from_param(Some("42"))
        );
    }
}
