use std::{fmt, str::FromStr};

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{DATE_SEPARATOR, DAY_MAX, DAY_MIN, MIN_DAYS_IN_MONTH, MONTH_MAX, prelude::*};

/// Error type for building snapshots from raw components or text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// Month index outside `MONTH_MIN..=MONTH_MAX`.
    #[error("Invalid month index: {0} (must be 0-{MONTH_MAX})")]
    InvalidMonth(u32),

    /// The calendar has no such day (or the year is out of its range).
    #[error("Invalid date: year {year}, month index {month}, day {day}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// Text that is not a `YYYY-MM-DD` / `YYYY-MM` value.
    #[error("Invalid snapshot format: {0}")]
    InvalidFormat(String),
}

/// An immutable (year, month, day) captured from the calendar.
///
/// Months are 0-based (`0` is January) to match the grid API. The wrapped
/// [`NaiveDate`] guarantees the day exists for its month, so a snapshot can
/// always be turned back into a calendar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[display(fmt = "{_0}")]
pub struct DateSnapshot(NaiveDate);

impl DateSnapshot {
    /// Creates a snapshot from a year, a 0-based month and a day of month.
    ///
    /// # Errors
    /// Returns `SnapshotError::InvalidMonth` for a month index above `MONTH_MAX`
    /// and `SnapshotError::InvalidDate` if the day does not exist.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, SnapshotError> {
        if month > MONTH_MAX {
            return Err(SnapshotError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month + 1, day)
            .map(Self)
            .ok_or(SnapshotError::InvalidDate { year, month, day })
    }

    #[inline]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// 0-based month
    #[inline]
    pub fn month(self) -> u32 {
        self.0.month0()
    }

    #[inline]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Reconstructs the calendar value this snapshot was taken from
    pub const fn to_date(self) -> NaiveDate {
        self.0
    }

    /// The month this date falls in
    pub fn month_snapshot(self) -> MonthSnapshot {
        MonthSnapshot::from(self.0)
    }
}

impl FromStr for DateSnapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<NaiveDate>()
            .map(Self)
            .map_err(|_| SnapshotError::InvalidFormat(s.to_owned()))
    }
}

impl Serialize for DateSnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An immutable (year, month) pair identifying the month being viewed.
/// Stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthSnapshot(NaiveDate);

impl MonthSnapshot {
    /// Creates a month snapshot from a year and a 0-based month.
    ///
    /// # Errors
    /// Returns `SnapshotError` if the month index or year is out of range.
    pub fn new(year: i32, month: u32) -> Result<Self, SnapshotError> {
        DateSnapshot::new(year, month, DAY_MIN).map(|first| Self(first.0))
    }

    #[inline]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// 0-based month
    #[inline]
    pub fn month(self) -> u32 {
        self.0.month0()
    }

    pub const fn first_day(self) -> DateSnapshot {
        DateSnapshot(self.0)
    }

    /// Number of days in this month, as reported by the calendar.
    pub fn days_in_month(self) -> u32 {
        (MIN_DAYS_IN_MONTH..=DAY_MAX)
            .rev()
            .find(|day| self.0.with_day(*day).is_some())
            .unwrap_or(MIN_DAYS_IN_MONTH)
    }

    /// The given day within this month, if the month has it
    pub fn with_day(self, day: u32) -> Option<DateSnapshot> {
        self.0.with_day(day).map(DateSnapshot)
    }

    /// Same year, different month.
    ///
    /// # Errors
    /// Returns `SnapshotError::InvalidMonth` for a month index above `MONTH_MAX`.
    pub fn with_month(self, month: u32) -> Result<Self, SnapshotError> {
        Self::new(self.year(), month)
    }

    /// The following month, rolling December into January of the next year.
    /// `None` only past the calendar's supported range.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// The preceding month, rolling January back into December.
    pub fn previous(self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(Self)
    }

    pub fn contains(self, date: &DateSnapshot) -> bool {
        date.month_snapshot() == self
    }
}

impl From<NaiveDate> for MonthSnapshot {
    fn from(date: NaiveDate) -> Self {
        // day 1 of an existing month always exists
        Self(date - Days::new(u64::from(date.day0())))
    }
}

impl From<DateSnapshot> for MonthSnapshot {
    fn from(date: DateSnapshot) -> Self {
        date.month_snapshot()
    }
}

impl fmt::Display for MonthSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{DATE_SEPARATOR}{:02}", self.year(), self.0.month())
    }
}

impl FromStr for MonthSnapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SnapshotError::InvalidFormat(s.to_owned());
        let (year, month) = s.trim().rsplit_once(DATE_SEPARATOR).ok_or_else(invalid)?;
        let year = year.trim().parse::<i32>().map_err(|_| invalid())?;
        let month = month.trim().parse::<u32>().map_err(|_| invalid())?;
        let month = month.checked_sub(1).ok_or_else(invalid)?;
        Self::new(year, month)
    }
}

impl Serialize for MonthSnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, month, naive};

    #[test]
    fn test_round_trip_through_calendar() {
        let values = [
            naive(1995, 7, 28),
            naive(2000, 2, 29),
            naive(2019, 8, 7),
            naive(2023, 12, 31),
            naive(2024, 1, 1),
        ];

        for value in values {
            let snapshot = DateSnapshot::from(value);
            assert_eq!(snapshot.to_date(), value, "round trip changed {value}");
            let restored: NaiveDate = snapshot.into();
            assert_eq!(restored, value);
        }
    }

    #[test]
    fn test_components_are_zero_based_month() {
        let snapshot = DateSnapshot::from(naive(2019, 8, 7));
        assert_eq!(snapshot.year(), 2019);
        assert_eq!(snapshot.month(), 7);
        assert_eq!(snapshot.day(), 7);
        assert_eq!(snapshot.weekday(), Weekday::Wed);
        assert_eq!(snapshot, date(2019, 7, 7));
    }

    #[test]
    fn test_new_invalid() {
        assert_eq!(DateSnapshot::new(2024, 12, 1), Err(SnapshotError::InvalidMonth(12)));
        assert_eq!(
            DateSnapshot::new(2023, 1, 29),
            Err(SnapshotError::InvalidDate {
                year:  2023,
                month: 1,
                day:   29,
            })
        );
        assert!(DateSnapshot::new(2024, 1, 29).is_ok());
        assert!(DateSnapshot::new(2024, 0, 0).is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(date(2019, 0, 31) < date(2019, 1, 1));
        assert!(date(2018, 11, 31) < date(2019, 0, 1));
        assert!(month(2018, 11) < month(2019, 0));
    }

    #[test]
    fn test_display_and_parse() {
        let snapshot = date(1991, 7, 15);
        assert_eq!(snapshot.to_string(), "1991-08-15");
        assert_eq!("1991-08-15".parse::<DateSnapshot>(), Ok(snapshot));
        assert!("1991-02-30".parse::<DateSnapshot>().is_err());

        let viewed = month(1991, 7);
        assert_eq!(viewed.to_string(), "1991-08");
        assert_eq!(" 1991-08 ".parse::<MonthSnapshot>(), Ok(viewed));
        assert!("1991-00".parse::<MonthSnapshot>().is_err());
        assert!("1991-13".parse::<MonthSnapshot>().is_err());
        assert!("199108".parse::<MonthSnapshot>().is_err());
    }

    #[test]
    fn test_serde_string_format() {
        let snapshot = date(2024, 1, 29);
        let json = serde_json::to_string(&snapshot).expect("failed to serialize date snapshot");
        assert_eq!(json, r#""2024-02-29""#);
        let parsed: DateSnapshot = serde_json::from_str(&json).expect("failed to deserialize date snapshot");
        assert_eq!(parsed, snapshot);

        let viewed = month(2024, 1);
        let json = serde_json::to_string(&viewed).expect("failed to serialize month snapshot");
        assert_eq!(json, r#""2024-02""#);
        let parsed: MonthSnapshot = serde_json::from_str(&json).expect("failed to deserialize month snapshot");
        assert_eq!(parsed, viewed);
    }

    #[test]
    fn test_days_in_month_cases() {
        struct TestCase {
            year:        i32,
            month:       u32,
            days:        u32,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2024,
                month:       0,
                days:        31,
                description: "January",
            },
            TestCase {
                year:        2024,
                month:       1,
                days:        29,
                description: "leap February",
            },
            TestCase {
                year:        2023,
                month:       1,
                days:        28,
                description: "non-leap February",
            },
            TestCase {
                year:        1900,
                month:       1,
                days:        28,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                month:       1,
                days:        29,
                description: "century divisible by 400",
            },
            TestCase {
                year:        2024,
                month:       3,
                days:        30,
                description: "April",
            },
            TestCase {
                year:        2024,
                month:       11,
                days:        31,
                description: "December",
            },
        ];

        for case in &cases {
            assert_eq!(
                month(case.year, case.month).days_in_month(),
                case.days,
                "{} {}",
                case.description,
                case.year
            );
        }
    }

    #[test]
    fn test_month_navigation_crosses_years() {
        let december = month(2019, 11);
        let january = december.next().expect("month after December");
        assert_eq!((january.year(), january.month()), (2020, 0));
        assert_eq!(january.previous(), Some(december));
        assert_eq!(month(2024, 4).next().and_then(MonthSnapshot::previous), Some(month(2024, 4)));
    }

    #[test]
    fn test_month_with_day_and_month() {
        let february = month(2023, 1);
        assert_eq!(february.with_day(28), Some(date(2023, 1, 28)));
        assert_eq!(february.with_day(29), None);
        assert_eq!(february.with_day(0), None);
        assert_eq!(february.first_day(), date(2023, 1, 1));

        assert_eq!(february.with_month(6), Ok(month(2023, 6)));
        assert_eq!(february.with_month(12), Err(SnapshotError::InvalidMonth(12)));
    }

    #[test]
    fn test_month_snapshot_from_date() {
        let snapshot = date(2019, 7, 7);
        assert_eq!(snapshot.month_snapshot(), month(2019, 7));
        assert_eq!(MonthSnapshot::from(naive(2019, 8, 31)), month(2019, 7));
        assert!(month(2019, 7).contains(&snapshot));
        assert!(!month(2019, 6).contains(&snapshot));
    }
}
