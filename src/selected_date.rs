use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{DateSnapshot, prelude::*};

/// Whether the picker selects one date or an inclusive range of dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    #[display(fmt = "single")]
    Single,
    #[display(fmt = "range")]
    Range,
}

/// Which range endpoint the next [`SelectedDate::set`] writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Slot {
    #[default]
    Low,
    High,
}

/// Holds zero, one or two selected dates under a [`SelectionMode`].
///
/// In range mode successive writes alternate between the low and high
/// endpoints. Writes that would leave `low > high` swap the two endpoints,
/// so the pair is always chronological no matter which order dates were
/// picked in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedDate {
    mode:    SelectionMode,
    current: Slot,
    low:     Option<DateSnapshot>,
    high:    Option<DateSnapshot>,
}

impl SelectedDate {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub const fn current(&self) -> Slot {
        self.current
    }

    pub const fn low_snapshot(&self) -> Option<DateSnapshot> {
        self.low
    }

    pub const fn high_snapshot(&self) -> Option<DateSnapshot> {
        self.high
    }

    /// Switches mode. Leaving range mode drops the high endpoint; the low
    /// endpoint survives either way. The next write always targets `Low`.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode == SelectionMode::Single {
            self.high = None;
        }
        self.mode = mode;
        self.current = Slot::Low;
    }

    /// Records a selected date.
    pub fn set(&mut self, snapshot: DateSnapshot) {
        match self.mode {
            SelectionMode::Single => {
                self.low = Some(snapshot);
                self.current = Slot::Low;
            },
            SelectionMode::Range => match self.current {
                Slot::Low => {
                    self.low = Some(snapshot);
                    self.normalize();
                    self.current = Slot::High;
                },
                Slot::High => {
                    self.high = Some(snapshot);
                    self.normalize();
                    self.current = Slot::Low;
                },
            },
        }
    }

    /// The selected date.
    ///
    /// Single mode returns the low endpoint. Range mode returns the low
    /// endpoint once the range is complete and `None` while it is still
    /// waiting for its second endpoint.
    pub fn get(&self) -> Option<DateSnapshot> {
        match self.mode {
            SelectionMode::Single => self.low,
            SelectionMode::Range => self.get_range().map(|(low, _)| low),
        }
    }

    /// `(low, high)` when in range mode with both endpoints set.
    pub fn get_range(&self) -> Option<(DateSnapshot, DateSnapshot)> {
        match (self.mode, self.low, self.high) {
            (SelectionMode::Range, Some(low), Some(high)) => Some((low, high)),
            _ => None,
        }
    }

    /// [`Self::get`] as a calendar value
    pub fn get_calendar(&self) -> Option<NaiveDate> {
        self.get().map(DateSnapshot::to_date)
    }

    /// Whether a day cell for `date` should render as selected.
    pub fn is_selected(&self, date: &DateSnapshot) -> bool {
        match (self.mode, self.low, self.high) {
            (SelectionMode::Range, Some(low), Some(high)) => low <= *date && *date <= high,
            (_, low, _) => low.as_ref() == Some(date),
        }
    }

    pub fn clear(&mut self) {
        self.low = None;
        self.high = None;
        self.current = Slot::Low;
    }

    fn normalize(&mut self) {
        if let (Some(low), Some(high)) = (self.low, self.high) {
            if low > high {
                self.low = Some(high);
                self.high = Some(low);
            }
        }
    }
}
