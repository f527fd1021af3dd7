/// Number of weekday columns in a month grid
pub const DAYS_IN_WEEK: usize = 7;

/// Sentinel `date` carried by blank alignment cells
pub const NO_DATE: u32 = 0;

/// First month index (January); months are 0-based
pub const MONTH_MIN: u32 = 0;
/// Last month index (December)
pub const MONTH_MAX: u32 = 11;

/// First day of any month
pub const DAY_MIN: u32 = 1;
/// Longest possible month
pub const DAY_MAX: u32 = 31;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Month-first format separator (legacy US format)
pub const MONTH_FIRST_SEPARATOR: char = '/';

/// Shortest possible month (non-leap February)
pub const MIN_DAYS_IN_MONTH: u32 = 28;
