//! Date calculation and selection state for calendar date pickers.
//!
//! The crate turns a month into an ordered list of grid cells ([`MonthGraph`]),
//! tracks a single date or an inclusive range of dates ([`SelectedDate`]) and
//! ties both together in a [`DatePickerController`] that owns the viewed month,
//! fires change listeners and hands cells to caller-supplied render callbacks.
//! Drawing, localized text and haptics stay with the caller.
//!
//! ```
//! use chrono::{NaiveDate, Weekday};
//! use date_picker::{MonthGraph, MonthItem, MonthSnapshot, SelectedDate};
//!
//! let february = MonthSnapshot::new(2024, 1).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap().into();
//! let items = MonthGraph::new(february, Weekday::Sun, false).month_items(&SelectedDate::default(), today);
//!
//! let days = items.iter().filter(|item| item.is_interactive()).count();
//! assert_eq!(days, 29);
//! assert!(matches!(items[0], MonthItem::WeekHeader { .. }));
//! ```

mod bounds;
mod config;
mod consts;
mod controller;
mod formatter;
mod month_graph;
mod prelude;
mod selected_date;
mod snapshot;
#[cfg(test)]
mod test_utils;

pub use bounds::{BoundsError, DateBounds};
pub use config::{DatePickerConfig, DisplayMode, RenderStyle};
pub use consts::*;
pub use controller::{DatePickerController, Haptics, NowProvider, OnDateChanged, RenderHeaders, RenderMonthItems};
pub use formatter::{DateFormatter, IsoDateFormatter, ParseError};
pub use month_graph::{DayOfMonth, DayOfWeek, MonthGraph, MonthItem};
pub use selected_date::{SelectedDate, SelectionMode, Slot};
pub use snapshot::{DateSnapshot, MonthSnapshot, SnapshotError};
