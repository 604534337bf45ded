//! Ordinal day, month and month-day conversions within a single year.
//!
//! All offsets are milliseconds since Jan 1, 00:00:00.000 of the year in
//! question.

use crate::Field;
use crate::consts::{DAY_MS, DAYS_IN_MONTH, DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP, JANUARY, LEAP_YEAR_MS, MIN_DAY, YEAR_MS};
use crate::range::{RangeError, check_range};
use serde::{Deserialize, Serialize};

/// A month located within its year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthSpan {
    pub month: i32,
    /// Offset of the month's first day from the year start.
    pub month_start_ms: i64,
    pub days_in_month: i32,
}

impl MonthSpan {
    /// Offset of the first day after this month from the year start.
    #[inline]
    pub const fn next_month_start_ms(&self) -> i64 {
        self.month_start_ms + self.days_in_month as i64 * DAY_MS
    }
}

const fn build_month_table(is_leap_year: bool) -> [MonthSpan; 12] {
    let mut table = [MonthSpan {
        month: 0,
        month_start_ms: 0,
        days_in_month: 0,
    }; 12];
    let mut month_start_ms = 0;
    let mut i = 0;
    while i < table.len() {
        let month = i as i32 + JANUARY;
        let days = days_in_month(month, is_leap_year);
        table[i] = MonthSpan {
            month,
            month_start_ms,
            days_in_month: days,
        };
        month_start_ms += days as i64 * DAY_MS;
        i += 1;
    }
    table
}

const COMMON_YEAR_MONTHS: [MonthSpan; 12] = build_month_table(false);
const LEAP_YEAR_MONTHS: [MonthSpan; 12] = build_month_table(true);

#[inline]
const fn month_table(is_leap_year: bool) -> &'static [MonthSpan; 12] {
    if is_leap_year { &LEAP_YEAR_MONTHS } else { &COMMON_YEAR_MONTHS }
}

#[inline]
const fn year_length_ms(is_leap_year: bool) -> i64 {
    if is_leap_year { LEAP_YEAR_MS } else { YEAR_MS }
}

/// Zero-based table index of `month`. Months outside `1..=12` wrap around.
#[inline]
const fn month_index(month: i32) -> usize {
    month.wrapping_sub(JANUARY).rem_euclid(DECEMBER) as usize
}

/// Days in `month` of a common or leap year.
///
/// Months outside `1..=12` wrap around the year, so 13 reads as January.
pub const fn days_in_month(month: i32, is_leap_year: bool) -> i32 {
    if month == FEBRUARY && is_leap_year {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month_index(month) + 1]
    }
}

fn check_year_offset(ms: i64, is_leap_year: bool) -> Result<i64, RangeError> {
    check_range("day offset", ms, 0, year_length_ms(is_leap_year) - 1)
}

pub const fn ordinal_day_to_offset_unchecked(ordinal_day: i32) -> i64 {
    (ordinal_day as i64 - 1) * DAY_MS
}

/// Offset of the start of `ordinal_day` (1-based) from the year start.
///
/// # Errors
/// Returns `RangeError` if `ordinal_day` is outside `1..=365`, or `1..=366`
/// in a leap year.
pub fn ordinal_day_to_offset(ordinal_day: i32, is_leap_year: bool) -> Result<i64, RangeError> {
    let days = (year_length_ms(is_leap_year) / DAY_MS) as i32;
    check_range(Field::OrdinalDay.label(), ordinal_day, MIN_DAY, days)?;
    Ok(ordinal_day_to_offset_unchecked(ordinal_day))
}

pub const fn offset_to_ordinal_day_unchecked(ms: i64) -> i32 {
    (ms / DAY_MS + 1) as i32
}

/// The 1-based day of the year containing `ms`.
///
/// # Errors
/// Returns `RangeError` if `ms` falls outside the year.
pub fn offset_to_ordinal_day(ms: i64, is_leap_year: bool) -> Result<i32, RangeError> {
    check_year_offset(ms, is_leap_year)?;
    Ok(offset_to_ordinal_day_unchecked(ms))
}

/// Offset of `month`/`month_day` without validating either. Months outside
/// `1..=12` wrap around the year like [`days_in_month`].
pub const fn month_and_day_to_offset_unchecked(month: i32, month_day: i32, is_leap_year: bool) -> i64 {
    month_table(is_leap_year)[month_index(month)].month_start_ms + (month_day as i64 - 1) * DAY_MS
}

/// Offset of the start of `month`/`month_day` from the year start.
///
/// The month is validated first, then the day against that month's length.
///
/// # Errors
/// Returns `RangeError` if `month` is outside `1..=12`, or if `month_day` does
/// not exist in that month.
pub fn month_and_day_to_offset(month: i32, month_day: i32, is_leap_year: bool) -> Result<i64, RangeError> {
    check_range(Field::Month.label(), month, JANUARY, DECEMBER)?;
    check_range(
        Field::MonthDay.label(),
        month_day,
        MIN_DAY,
        days_in_month(month, is_leap_year),
    )?;
    Ok(month_and_day_to_offset_unchecked(month, month_day, is_leap_year))
}

/// Finds the month containing `ms`.
///
/// Scans from December down and stops at the first month starting at or
/// before `ms`. Twelve entries make a linear scan the cheapest option.
pub fn offset_to_month_unchecked(ms: i64, is_leap_year: bool) -> MonthSpan {
    let table = month_table(is_leap_year);
    table
        .iter()
        .rev()
        .find(|span| span.month_start_ms <= ms)
        .copied()
        .unwrap_or(table[0])
}

/// Finds the month containing `ms`.
///
/// # Errors
/// Returns `RangeError` if `ms` falls outside the year.
pub fn offset_to_month(ms: i64, is_leap_year: bool) -> Result<MonthSpan, RangeError> {
    check_year_offset(ms, is_leap_year)?;
    Ok(offset_to_month_unchecked(ms, is_leap_year))
}

pub const fn offset_to_month_day_unchecked(ms: i64, month_start_ms: i64) -> i32 {
    (ms.wrapping_sub(month_start_ms) / DAY_MS + 1) as i32
}

/// The 1-based day of the month containing `ms`, given that month's bounds.
///
/// # Errors
/// Returns `RangeError` if `ms` is outside `month_start_ms..next_month_start_ms`.
pub fn offset_to_month_day(ms: i64, month_start_ms: i64, next_month_start_ms: i64) -> Result<i32, RangeError> {
    check_range("month offset", ms, month_start_ms, next_month_start_ms - 1)?;
    Ok(offset_to_month_day_unchecked(ms, month_start_ms))
}
