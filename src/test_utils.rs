//! Shared constructors for unit tests.

use chrono::NaiveDate;

use crate::{DateSnapshot, MonthSnapshot};

/// Calendar value with a 1-based month, as chrono counts them
pub fn naive(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("test date must exist")
}

/// Snapshot with a 0-based month
pub fn date(year: i32, month: u32, day: u32) -> DateSnapshot {
    DateSnapshot::new(year, month, day).expect("test snapshot must exist")
}

/// Month snapshot with a 0-based month
pub fn month(year: i32, month: u32) -> MonthSnapshot {
    MonthSnapshot::new(year, month).expect("test month must exist")
}
