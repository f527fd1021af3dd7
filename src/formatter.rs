use chrono::{NaiveDate, Weekday};

use crate::{DATE_SEPARATOR, MONTH_FIRST_SEPARATOR, prelude::*};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-12)", "_0")]
    InvalidMonth(u32),
    #[display(fmt = "Invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Converts between typed text and calendar values.
///
/// The picker only ever parses through this trait; a failed parse is
/// treated as "no input yet" rather than an error.
pub trait DateFormatter {
    /// # Errors
    /// Returns `ParseError` when the text is not a recognizable date.
    fn parse_input(&self, input: &str) -> Result<NaiveDate, ParseError>;

    fn format_input(&self, date: NaiveDate) -> String;

    fn weekday_abbreviation(&self, weekday: Weekday) -> String {
        weekday.to_string()
    }
}

/// Accepts `YYYY-MM-DD` and month-first `MM/DD/YYYY`, writes `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoDateFormatter;

impl DateFormatter for IsoDateFormatter {
    fn parse_input(&self, input: &str) -> Result<NaiveDate, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // Strictly enforce delimiters: DATE_SEPARATOR for ISO, MONTH_FIRST_SEPARATOR for month-first
        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(MONTH_FIRST_SEPARATOR);

        match (has_hyphen, has_slash) {
            (true, true) => Err(ParseError::InvalidFormat(format!(
                "Mixed delimiters ({DATE_SEPARATOR} and {MONTH_FIRST_SEPARATOR})"
            ))),
            (true, false) => {
                let parts = Self::split(trimmed, DATE_SEPARATOR)?;
                let year = Self::parse_i32(parts[0])?;
                let month = Self::parse_u32(parts[1])?;
                let day = Self::parse_u32(parts[2])?;
                Self::to_date(year, month, day)
            },
            (false, true) => {
                let parts = Self::split(trimmed, MONTH_FIRST_SEPARATOR)?;
                let month = Self::parse_u32(parts[0])?;
                let day = Self::parse_u32(parts[1])?;
                let year = Self::parse_i32(parts[2])?;
                Self::to_date(year, month, day)
            },
            (false, false) => Err(ParseError::InvalidFormat(trimmed.to_owned())),
        }
    }

    fn format_input(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

impl IsoDateFormatter {
    /// Splits into exactly three trimmed components
    fn split(s: &str, separator: char) -> Result<[&str; 3], ParseError> {
        let parts: Vec<&str> = s.split(separator).map(str::trim).collect();
        <[&str; 3]>::try_from(parts).map_err(|parts| {
            ParseError::InvalidFormat(format!(
                "Expected 2 {separator} separators, found {}",
                parts.len().saturating_sub(1)
            ))
        })
    }

    fn parse_i32(s: &str) -> Result<i32, ParseError> {
        s.parse::<i32>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u32(s: &str) -> Result<u32, ParseError> {
        s.parse::<u32>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn to_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, ParseError> {
        if !(1..=12).contains(&month) {
            return Err(ParseError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDate { year, month, day })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::naive;

    #[test]
    fn test_parse_iso_full_date() {
        let date = IsoDateFormatter.parse_input("1991-08-15").unwrap();
        assert_eq!(date, naive(1991, 8, 15));
    }

    #[test]
    fn test_parse_month_first() {
        let date = IsoDateFormatter.parse_input("08/15/1991").unwrap();
        assert_eq!(date, naive(1991, 8, 15));
    }

    #[test]
    fn test_parse_with_whitespace() {
        let date = " 08 / 15 / 1991 ".parse_date();
        assert_eq!(date, Ok(naive(1991, 8, 15)));
    }

    #[test]
    fn test_parse_errors() {
        struct TestCase {
            input:       &'static str,
            expected:    ParseError,
            description: &'static str,
        }

        let cases = [
            TestCase {
                input:       "   ",
                expected:    ParseError::EmptyInput,
                description: "blank input",
            },
            TestCase {
                input:       "not a date",
                expected:    ParseError::InvalidFormat("not a date".to_owned()),
                description: "no delimiters",
            },
            TestCase {
                input:       "1991-08/15",
                expected:    ParseError::InvalidFormat("Mixed delimiters (- and /)".to_owned()),
                description: "mixed delimiters",
            },
            TestCase {
                input:       "1991-08",
                expected:    ParseError::InvalidFormat("Expected 2 - separators, found 1".to_owned()),
                description: "missing day",
            },
            TestCase {
                input:       "13/01/1991",
                expected:    ParseError::InvalidMonth(13),
                description: "month out of range",
            },
            TestCase {
                input:       "02/30/2020",
                expected:    ParseError::InvalidDate {
                    year:  2020,
                    month: 2,
                    day:   30,
                },
                description: "day out of range",
            },
            TestCase {
                input:       "1991-aa-15",
                expected:    ParseError::InvalidFormat("aa".to_owned()),
                description: "non-numeric month",
            },
        ];

        for case in &cases {
            assert_eq!(case.input.parse_date(), Err(case.expected.clone()), "{}", case.description);
        }
    }

    #[test]
    fn test_leap_day() {
        assert_eq!("02/29/2020".parse_date(), Ok(naive(2020, 2, 29)));
        assert!("2021-02-29".parse_date().is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ParseError::InvalidMonth(13).to_string(), "Invalid month: 13 (must be 1-12)");
        assert_eq!(
            ParseError::InvalidDate {
                year:  2020,
                month: 2,
                day:   30,
            }
            .to_string(),
            "Invalid date 2020-02-30"
        );
    }

    #[test]
    fn test_format_round_trip() {
        let text = IsoDateFormatter.format_input(naive(2024, 2, 29));
        assert_eq!(text, "2024-02-29");
        assert_eq!(text.parse_date(), Ok(naive(2024, 2, 29)));
        assert_eq!(IsoDateFormatter.weekday_abbreviation(Weekday::Thu), "Thu");
    }

    trait ParseDate {
        fn parse_date(&self) -> Result<NaiveDate, ParseError>;
    }

    impl ParseDate for str {
        fn parse_date(&self) -> Result<NaiveDate, ParseError> {
            IsoDateFormatter.parse_input(self)
        }
    }
}
