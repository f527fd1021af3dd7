use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::{BoundsError, DateBounds, DateSnapshot, SelectionMode, prelude::*};

/// Which view the picker is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Month grid
    #[default]
    #[display(fmt = "calendar")]
    Calendar,
    #[display(fmt = "year_list")]
    YearList,
    #[display(fmt = "month_list")]
    MonthList,
}

/// Presentation settings the picker passes through to renderers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub normal_font:        Option<String>,
    /// ARGB
    pub selection_color:    Option<u32>,
    pub today_stroke_color: Option<u32>,
}

/// Picker options.
///
/// Every field has a default, so partial documents deserialize:
///
/// ```
/// let config: date_picker::DatePickerConfig =
///     serde_json::from_str(r#"{ "selection_mode": "range", "first_day_of_week": "Mon" }"#).unwrap();
/// assert!(config.bounds().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePickerConfig {
    pub min_date:          Option<DateSnapshot>,
    pub max_date:          Option<DateSnapshot>,
    pub selection_mode:    SelectionMode,
    pub display_mode:      DisplayMode,
    pub first_day_of_week: Weekday,
    pub show_week_numbers: bool,
    pub style:             RenderStyle,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            min_date:          None,
            max_date:          None,
            selection_mode:    SelectionMode::default(),
            display_mode:      DisplayMode::default(),
            first_day_of_week: Weekday::Sun,
            show_week_numbers: false,
            style:             RenderStyle::default(),
        }
    }
}

impl DatePickerConfig {
    /// Validated min/max limits.
    ///
    /// # Errors
    /// Returns `BoundsError::InvalidRange` if `min_date` is after `max_date`.
    pub fn bounds(&self) -> Result<DateBounds, BoundsError> {
        DateBounds::new(self.min_date, self.max_date)
    }
}
