//! Weekdays and ISO-8601 week numbering.
//!
//! Weekdays follow ISO-8601: 1 is Monday, 7 is Sunday. Week 1 of an ISO year
//! is the week containing that year's first Thursday.

use crate::Field;
use crate::consts::{
    DAY_MS, LONG_ISO_YEAR_WEEKS, MAX_TIMESTAMP, MIN_TIMESTAMP, MONDAY,
    SHORT_ISO_YEAR_WEEKS, SUNDAY, THURSDAY, WEDNESDAY, WEEK_MS,
};
use crate::range::{RangeError, check_range};
use crate::year::{YearStart, year_to_epoch, year_to_epoch_unchecked};
use serde::{Deserialize, Serialize};

/// A day expressed in the ISO week-numbering calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IsoWeekDate {
    /// Differs from the Gregorian year for days early in January and late in
    /// December.
    pub iso_week_year: i32,
    pub iso_week: i32,
    pub weekday: i32,
}

fn check_weekday(label: &'static str, weekday: i32) -> Result<i32, RangeError> {
    check_range(label, weekday, MONDAY, SUNDAY)
}

/// ISO weekday of the day containing `timestamp`.
///
/// 1970-01-01 was a Thursday; shifting the day count back by three lines
/// Monday up with a remainder of 1.
pub const fn weekday_of_unchecked(timestamp: i64) -> i32 {
    let weekday = (timestamp.div_euclid(DAY_MS) - 3).rem_euclid(7) as i32;
    if weekday == 0 { SUNDAY } else { weekday }
}

/// ISO weekday of the day containing `timestamp`.
///
/// # Errors
/// Returns `RangeError` if `timestamp` is outside `MIN_TIMESTAMP..=MAX_TIMESTAMP`.
pub fn weekday_of(timestamp: i64) -> Result<i32, RangeError> {
    check_range("timestamp", timestamp, MIN_TIMESTAMP, MAX_TIMESTAMP)?;
    Ok(weekday_of_unchecked(timestamp))
}

/// Offset from the year start to the Monday starting ISO week 1.
///
/// Non-positive when Jan 1 falls on Monday through Thursday, otherwise one to
/// three days into the year.
pub const fn first_iso_week_offset_unchecked(first_day_of_year_weekday: i32) -> i64 {
    let weekday = first_day_of_year_weekday as i64;
    let days = if first_day_of_year_weekday <= THURSDAY {
        MONDAY as i64 - weekday
    } else {
        SUNDAY as i64 + 1 - weekday
    };
    days * DAY_MS
}

/// Offset from the year start to the Monday starting ISO week 1.
///
/// # Errors
/// Returns `RangeError` if the weekday is outside `1..=7`.
pub fn first_iso_week_offset(first_day_of_year_weekday: i32) -> Result<i64, RangeError> {
    check_weekday("first day of year weekday", first_day_of_year_weekday)?;
    Ok(first_iso_week_offset_unchecked(first_day_of_year_weekday))
}

/// Whether the ISO year has 53 weeks: Jan 1 on a Thursday, or on a
/// Wednesday in a leap year.
pub const fn is_long_iso_year_unchecked(first_day_of_year_weekday: i32, is_leap_year: bool) -> bool {
    first_day_of_year_weekday == THURSDAY || (is_leap_year && first_day_of_year_weekday == WEDNESDAY)
}

/// Whether the ISO year has 53 weeks.
///
/// # Errors
/// Returns `RangeError` if the weekday is outside `1..=7`.
pub fn is_long_iso_year(first_day_of_year_weekday: i32, is_leap_year: bool) -> Result<bool, RangeError> {
    check_weekday("first day of year weekday", first_day_of_year_weekday)?;
    Ok(is_long_iso_year_unchecked(first_day_of_year_weekday, is_leap_year))
}

pub const fn iso_weeks_in_year(first_day_of_year_weekday: i32, is_leap_year: bool) -> i32 {
    if is_long_iso_year_unchecked(first_day_of_year_weekday, is_leap_year) {
        LONG_ISO_YEAR_WEEKS
    } else {
        SHORT_ISO_YEAR_WEEKS
    }
}

pub const fn iso_week_and_weekday_to_offset_unchecked(iso_week: i32, weekday: i32, first_iso_week_offset_ms: i64) -> i64 {
    let weeks = (iso_week as i64 - 1) * WEEK_MS;
    let days = (weekday as i64 - MONDAY as i64) * DAY_MS;
    first_iso_week_offset_ms.wrapping_add(weeks).wrapping_add(days)
}

/// Offset from the year start to the given ISO week and weekday of that
/// year's ISO numbering.
///
/// The result can be negative (days in the previous Gregorian year) or past
/// the end of the year (days in the next one).
///
/// # Errors
/// Returns `RangeError` if either weekday is outside `1..=7` or `iso_week`
/// exceeds the year's 52 or 53 weeks.
pub fn iso_week_and_weekday_to_offset(
    iso_week: i32,
    weekday: i32,
    first_day_of_year_weekday: i32,
    is_leap_year: bool,
) -> Result<i64, RangeError> {
    check_weekday("first day of year weekday", first_day_of_year_weekday)?;
    check_weekday(Field::Weekday.label(), weekday)?;
    check_range(
        Field::IsoWeek.label(),
        iso_week,
        1,
        iso_weeks_in_year(first_day_of_year_weekday, is_leap_year),
    )?;
    Ok(iso_week_and_weekday_to_offset_unchecked(
        iso_week,
        weekday,
        first_iso_week_offset_unchecked(first_day_of_year_weekday),
    ))
}

/// ISO `(week, weekday)` of the day at `ms`, both measured from the same year
/// start. `ms` must not precede the first ISO week.
pub const fn offset_to_iso_week_unchecked(ms: i64, first_iso_week_offset_ms: i64) -> (i32, i32) {
    let since_first_week = ms.wrapping_sub(first_iso_week_offset_ms);
    (
        (since_first_week / WEEK_MS + 1) as i32,
        ((since_first_week % WEEK_MS) / DAY_MS) as i32 + MONDAY,
    )
}

/// ISO `(week, weekday)` of the day at `ms` within the ISO year described by
/// its Jan 1 weekday and leapness.
///
/// # Errors
/// Returns `RangeError` if `ms` is outside the ISO year.
pub fn offset_to_iso_week(ms: i64, first_day_of_year_weekday: i32, is_leap_year: bool) -> Result<(i32, i32), RangeError> {
    let first = first_iso_week_offset(first_day_of_year_weekday)?;
    let weeks = iso_weeks_in_year(first_day_of_year_weekday, is_leap_year);
    check_range("ISO year offset", ms, first, first + i64::from(weeks) * WEEK_MS - 1)?;
    Ok(offset_to_iso_week_unchecked(ms, first))
}

/// ISO week date of the day `ms` after the start of Gregorian `year`.
///
/// Handles days that belong to the last week of the previous ISO year or the
/// first week of the next one.
pub const fn iso_week_date_unchecked(year: i32, start: &YearStart, ms: i64) -> IsoWeekDate {
    let first_day = start.first_day_weekday();
    let first = first_iso_week_offset_unchecked(first_day);
    let end = first + iso_weeks_in_year(first_day, start.is_leap_year) as i64 * WEEK_MS;

    let (iso_week_year, base) = if ms < first {
        let previous_year = year.wrapping_sub(1);
        let previous = year_to_epoch_unchecked(previous_year);
        let previous_first = first_iso_week_offset_unchecked(previous.first_day_weekday());
        let previous_length = start.year_start_ms.wrapping_sub(previous.year_start_ms);
        (previous_year, previous_first.wrapping_sub(previous_length))
    } else if ms >= end {
        (year.wrapping_add(1), end)
    } else {
        (year, first)
    };

    let (iso_week, weekday) = offset_to_iso_week_unchecked(ms, base);
    IsoWeekDate {
        iso_week_year,
        iso_week,
        weekday,
    }
}

/// ISO week date of the day `ms` after the start of Gregorian `year`.
///
/// # Errors
/// Returns `RangeError` if `year` is out of range or `ms` falls outside it.
pub fn iso_week_date(year: i32, ms: i64) -> Result<IsoWeekDate, RangeError> {
    let start = year_to_epoch(year)?;
    check_range("day offset", ms, 0, start.year_length_ms() - 1)?;
    Ok(iso_week_date_unchecked(year, &start, ms))
}
