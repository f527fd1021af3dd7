use chrono::{Datelike, Days, Weekday};

use crate::{DAYS_IN_WEEK, DateSnapshot, MonthSnapshot, NO_DATE, SelectedDate, prelude::*};

/// Payload of a column header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DayOfWeek {
    #[display(fmt = "{_0}")]
    Day(Weekday),
    /// Header above the week-number column
    #[display(fmt = "#")]
    WeekNumber,
}

/// One day cell. Blank alignment cells carry [`NO_DATE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayOfMonth {
    pub date:        u32,
    pub is_selected: bool,
    pub is_today:    bool,
}

impl DayOfMonth {
    pub const fn blank() -> Self {
        Self {
            date:        NO_DATE,
            is_selected: false,
            is_today:    false,
        }
    }

    pub const fn is_blank(&self) -> bool {
        self.date == NO_DATE
    }
}

/// A single cell of a rendered month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthItem {
    WeekHeader { day_of_week: DayOfWeek },
    /// Leading cell of a week row when week numbers are shown
    Week { week_number: u32 },
    DayOfMonth(DayOfMonth),
}

impl MonthItem {
    /// Only real day cells react to taps
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::DayOfMonth(day) if !day.is_blank())
    }
}

/// Grid layout for one month.
///
/// Rows are [`DAYS_IN_WEEK`] wide, plus one leading column when week numbers
/// are shown. The first row holds the weekday headers starting at
/// `first_day_of_week`; day rows follow, padded with blank cells before day 1
/// and after the last day so every row is complete. Depending on alignment a
/// month spans 4, 5 or 6 day rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGraph {
    month:             MonthSnapshot,
    first_day_of_week: Weekday,
    show_week_numbers: bool,
    days_in_month:     u32,
    leading_blanks:    u32,
}

impl MonthGraph {
    pub fn new(month: MonthSnapshot, first_day_of_week: Weekday, show_week_numbers: bool) -> Self {
        let first_weekday = month.first_day().weekday();
        let leading_blanks = (first_weekday.num_days_from_monday() + DAYS_IN_WEEK as u32
            - first_day_of_week.num_days_from_monday())
            % DAYS_IN_WEEK as u32;

        Self {
            month,
            first_day_of_week,
            show_week_numbers,
            days_in_month: month.days_in_month(),
            leading_blanks,
        }
    }

    /// Builds the grid for the month containing `reference` in one step.
    pub fn build(
        reference: DateSnapshot,
        first_day_of_week: Weekday,
        show_week_numbers: bool,
        selection: &SelectedDate,
        today: DateSnapshot,
    ) -> Vec<MonthItem> {
        Self::new(reference.month_snapshot(), first_day_of_week, show_week_numbers).month_items(selection, today)
    }

    pub const fn month(&self) -> MonthSnapshot {
        self.month
    }

    /// Cells per row
    pub const fn columns(&self) -> usize {
        if self.show_week_numbers { DAYS_IN_WEEK + 1 } else { DAYS_IN_WEEK }
    }

    /// Blank cells before day 1
    pub const fn leading_blanks(&self) -> u32 {
        self.leading_blanks
    }

    /// Number of day rows, header row excluded
    pub const fn week_count(&self) -> u32 {
        (self.leading_blanks + self.days_in_month).div_ceil(DAYS_IN_WEEK as u32)
    }

    /// Weekdays in column order
    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> {
        std::iter::successors(Some(self.first_day_of_week), |day| Some(day.succ())).take(DAYS_IN_WEEK)
    }

    pub fn month_items(&self, selection: &SelectedDate, today: DateSnapshot) -> Vec<MonthItem> {
        let rows = self.week_count() as usize;
        let mut items = Vec::with_capacity((rows + 1) * self.columns());

        if self.show_week_numbers {
            items.push(MonthItem::WeekHeader {
                day_of_week: DayOfWeek::WeekNumber,
            });
        }
        items.extend(self.weekdays().map(|day| MonthItem::WeekHeader {
            day_of_week: DayOfWeek::Day(day),
        }));

        let first = i64::from(self.leading_blanks);
        for row in 0..rows {
            if self.show_week_numbers {
                items.push(MonthItem::Week {
                    week_number: self.week_number(row),
                });
            }
            for column in 0..DAYS_IN_WEEK {
                // 1-based day for this cell; out-of-month positions stay blank
                let day = (row * DAYS_IN_WEEK + column) as i64 - first + 1;
                let cell = u32::try_from(day)
                    .ok()
                    .and_then(|day| self.month.with_day(day))
                    .map_or_else(DayOfMonth::blank, |date| DayOfMonth {
                        date:        date.day(),
                        is_selected: selection.is_selected(&date),
                        is_today:    date == today,
                    });
                items.push(MonthItem::DayOfMonth(cell));
            }
        }

        items
    }

    /// ISO week of the first Monday at or after the row's starting date.
    /// The starting date of the first row may fall in the previous month.
    fn week_number(&self, row: usize) -> u32 {
        let first = self.month.first_day().to_date();
        let offset = (row * DAYS_IN_WEEK) as u64;
        let row_start = first
            .checked_sub_days(Days::new(u64::from(self.leading_blanks)))
            .and_then(|start| start.checked_add_days(Days::new(offset)))
            .unwrap_or(first);
        let to_monday = (DAYS_IN_WEEK as u32 - row_start.weekday().num_days_from_monday()) % DAYS_IN_WEEK as u32;
        row_start
            .checked_add_days(Days::new(u64::from(to_monday)))
            .unwrap_or(row_start)
            .iso_week()
            .week()
    }
}
