use crate::year::year_to_epoch_unchecked;

/// Milliseconds in one second
pub const SECOND_MS: i64 = 1_000;
/// Milliseconds in one minute
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
/// Milliseconds in one hour
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
/// Milliseconds in one day
pub const DAY_MS: i64 = 24 * HOUR_MS;
/// Milliseconds in one week
pub const WEEK_MS: i64 = 7 * DAY_MS;
/// Milliseconds in a common (365 day) year
pub const YEAR_MS: i64 = 365 * DAY_MS;
/// Milliseconds in a leap (366 day) year
pub const LEAP_YEAR_MS: i64 = 366 * DAY_MS;

/// Four years, the last of which is a leap year
pub(crate) const FOUR_YEARS_MS: i64 = 4 * YEAR_MS + DAY_MS;
/// One hundred years whose final year is not a leap year
pub(crate) const HUNDRED_YEARS_MS: i64 = 25 * FOUR_YEARS_MS - DAY_MS;
/// A full Gregorian cycle. Leap pattern and weekdays repeat after it.
pub(crate) const FOUR_HUNDRED_YEARS_MS: i64 = 4 * HUNDRED_YEARS_MS + DAY_MS;

/// First year of the Gregorian cycle every year computation is anchored on.
/// 2001 starts a cycle whose last year (2400) is a leap year.
pub const CYCLE_ANCHOR_YEAR: i32 = 2001;
/// Timestamp of 2001-01-01T00:00:00.000Z
pub const CYCLE_ANCHOR_MS: i64 = 978_307_200_000;

/// Year of the Unix epoch
pub const EPOCH_YEAR: i32 = 1970;
/// Largest distance in years from the epoch year that can be represented
pub const MAX_YEAR_OFFSET: i32 = 273_789;
/// Minimum valid year (inclusive)
pub const MIN_FULL_YEAR: i32 = EPOCH_YEAR - MAX_YEAR_OFFSET;
/// Maximum valid year (inclusive)
pub const MAX_FULL_YEAR: i32 = EPOCH_YEAR + MAX_YEAR_OFFSET;

/// First millisecond of `MIN_FULL_YEAR`
///
/// The range is aligned to whole years, so it is not symmetric around the
/// epoch: `MIN_TIMESTAMP` is -8 639 946 259 200 000 while `MAX_TIMESTAMP` is
/// 8 639 977 881 599 999. Do not assume `MIN_TIMESTAMP == -MAX_TIMESTAMP`.
pub const MIN_TIMESTAMP: i64 = year_to_epoch_unchecked(MIN_FULL_YEAR).year_start_ms;
/// Last millisecond of `MAX_FULL_YEAR`
///
/// See [`MIN_TIMESTAMP`] for why the range is not symmetric.
pub const MAX_TIMESTAMP: i64 = year_to_epoch_unchecked(MAX_FULL_YEAR + 1).year_start_ms - 1;

/// First day of month, used for lower bounds
pub const MIN_DAY: i32 = 1;

/// Month number for January
pub const JANUARY: i32 = 1;
/// Month number for February
pub const FEBRUARY: i32 = 2;
/// Month number for December, the last valid month
pub const DECEMBER: i32 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: i32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [i32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// ISO-8601 weekday of Monday
pub const MONDAY: i32 = 1;
/// ISO-8601 weekday of Wednesday
pub const WEDNESDAY: i32 = 3;
/// ISO-8601 weekday of Thursday
pub const THURSDAY: i32 = 4;
/// ISO-8601 weekday of Sunday
pub const SUNDAY: i32 = 7;

/// Weeks in a short ISO week-numbering year
pub const SHORT_ISO_YEAR_WEEKS: i32 = 52;
/// Weeks in a long ISO week-numbering year
pub const LONG_ISO_YEAR_WEEKS: i32 = 53;

/// Westernmost supported UTC offset, in hours
pub const MIN_TIMEZONE_OFFSET_HOURS: i32 = -12;
/// Easternmost supported UTC offset, in hours
pub const MAX_TIMEZONE_OFFSET_HOURS: i32 = 14;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;
