use serde::Serialize;

use crate::{DateSnapshot, MonthSnapshot};

/// Optional inclusive limits on which dates can be picked.
/// When both are present, `min` must be less than or equal to `max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DateBounds {
    min: Option<DateSnapshot>,
    max: Option<DateSnapshot>,
}

/// Error type for bound construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    /// Minimum date is after maximum date.
    #[error("Invalid date bounds: min ({min}) is after max ({max})")]
    InvalidRange { min: DateSnapshot, max: DateSnapshot },
}

impl DateBounds {
    /// Creates bounds with validation.
    ///
    /// # Errors
    /// Returns `BoundsError::InvalidRange` if min > max.
    pub fn new(min: Option<DateSnapshot>, max: Option<DateSnapshot>) -> Result<Self, BoundsError> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(BoundsError::InvalidRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    pub const fn unbounded() -> Self {
        Self { min: None, max: None }
    }

    pub const fn min(&self) -> Option<DateSnapshot> {
        self.min
    }

    pub const fn max(&self) -> Option<DateSnapshot> {
        self.max
    }

    /// Checks if the bounds admit a given date
    pub fn contains(&self, date: &DateSnapshot) -> bool {
        self.min.is_none_or(|min| min <= *date) && self.max.is_none_or(|max| *date <= max)
    }

    pub fn is_out_of_range(&self, date: &DateSnapshot) -> bool {
        !self.contains(date)
    }

    /// Whether the month before `month` still holds a pickable day
    pub fn can_go_back(&self, month: MonthSnapshot) -> bool {
        self.min.is_none_or(|min| min.month_snapshot() < month)
    }

    /// Whether the month after `month` still holds a pickable day
    pub fn can_go_forward(&self, month: MonthSnapshot) -> bool {
        self.max.is_none_or(|max| month < max.month_snapshot())
    }
}
