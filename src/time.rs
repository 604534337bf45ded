//! Clock components within a day.
//!
//! Hours, minutes, seconds and milliseconds all have a fixed length, so each
//! conversion is a single multiply or divide. Inverse conversions take the
//! offset within the enclosing unit (the day for hours, the hour for minutes,
//! and so on).

use crate::consts::{
    DAY_MS, HOUR_MS, MAX_TIMEZONE_OFFSET_HOURS, MIN_TIMEZONE_OFFSET_HOURS, MINUTE_MS, SECOND_MS,
};
use crate::range::{RangeError, check_range};
use crate::{Field, Meridiem};
use serde::{Deserialize, Serialize};

/// Every clock reading of an offset within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour24: i32,
    pub hour12: i32,
    pub meridiem: Meridiem,
    pub minute: i32,
    pub second: i32,
    pub millisecond: i32,
}

pub const fn hour24_to_offset_unchecked(hour24: i32) -> i64 {
    hour24 as i64 * HOUR_MS
}

/// # Errors
/// Returns `RangeError` if `hour24` is outside `0..=23`.
pub fn hour24_to_offset(hour24: i32) -> Result<i64, RangeError> {
    check_range(Field::Hour24.label(), hour24, 0, 23)?;
    Ok(hour24_to_offset_unchecked(hour24))
}

pub const fn offset_to_hour24_unchecked(ms: i64) -> i32 {
    (ms / HOUR_MS) as i32
}

/// # Errors
/// Returns `RangeError` if `ms` is not within a day.
pub fn offset_to_hour24(ms: i64) -> Result<i32, RangeError> {
    check_range("day offset", ms, 0, DAY_MS - 1)?;
    Ok(offset_to_hour24_unchecked(ms))
}

pub const fn hour12_and_meridiem_to_offset_unchecked(hour12: i32, meridiem: Meridiem) -> i64 {
    (hour12 as i64 + meridiem.offset_hours() as i64) * HOUR_MS
}

/// Offset of a 12 hour clock reading. `hour12` runs `0..=11`, so midnight is
/// `0 AM` and noon is `0 PM`.
///
/// # Errors
/// Returns `RangeError` if `hour12` is outside `0..=11`.
pub fn hour12_and_meridiem_to_offset(hour12: i32, meridiem: Meridiem) -> Result<i64, RangeError> {
    check_range(Field::Hour12.label(), hour12, 0, 11)?;
    Ok(hour12_and_meridiem_to_offset_unchecked(hour12, meridiem))
}

pub const fn offset_to_hour12_and_meridiem_unchecked(ms: i64) -> (i32, Meridiem) {
    let hour24 = offset_to_hour24_unchecked(ms);
    let meridiem = Meridiem::of_hour24(hour24);
    (hour24 - meridiem.offset_hours(), meridiem)
}

/// # Errors
/// Returns `RangeError` if `ms` is not within a day.
pub fn offset_to_hour12_and_meridiem(ms: i64) -> Result<(i32, Meridiem), RangeError> {
    check_range("day offset", ms, 0, DAY_MS - 1)?;
    Ok(offset_to_hour12_and_meridiem_unchecked(ms))
}

pub const fn minute_to_offset_unchecked(minute: i32) -> i64 {
    minute as i64 * MINUTE_MS
}

/// # Errors
/// Returns `RangeError` if `minute` is outside `0..=59`.
pub fn minute_to_offset(minute: i32) -> Result<i64, RangeError> {
    check_range(Field::Minute.label(), minute, 0, 59)?;
    Ok(minute_to_offset_unchecked(minute))
}

pub const fn offset_to_minute_unchecked(ms: i64) -> i32 {
    (ms / MINUTE_MS) as i32
}

/// # Errors
/// Returns `RangeError` if `ms` is not within an hour.
pub fn offset_to_minute(ms: i64) -> Result<i32, RangeError> {
    check_range("hour offset", ms, 0, HOUR_MS - 1)?;
    Ok(offset_to_minute_unchecked(ms))
}

pub const fn second_to_offset_unchecked(second: i32) -> i64 {
    second as i64 * SECOND_MS
}

/// # Errors
/// Returns `RangeError` if `second` is outside `0..=59`.
pub fn second_to_offset(second: i32) -> Result<i64, RangeError> {
    check_range(Field::Second.label(), second, 0, 59)?;
    Ok(second_to_offset_unchecked(second))
}

pub const fn offset_to_second_unchecked(ms: i64) -> i32 {
    (ms / SECOND_MS) as i32
}

/// # Errors
/// Returns `RangeError` if `ms` is not within a minute.
pub fn offset_to_second(ms: i64) -> Result<i32, RangeError> {
    check_range("minute offset", ms, 0, MINUTE_MS - 1)?;
    Ok(offset_to_second_unchecked(ms))
}

pub const fn millisecond_to_offset_unchecked(millisecond: i32) -> i64 {
    millisecond as i64
}

/// # Errors
/// Returns `RangeError` if `millisecond` is outside `0..=999`.
pub fn millisecond_to_offset(millisecond: i32) -> Result<i64, RangeError> {
    check_range(Field::Millisecond.label(), millisecond, 0, 999)?;
    Ok(millisecond_to_offset_unchecked(millisecond))
}

pub const fn offset_to_millisecond_unchecked(ms: i64) -> i32 {
    ms as i32
}

/// # Errors
/// Returns `RangeError` if `ms` is not within a second.
pub fn offset_to_millisecond(ms: i64) -> Result<i32, RangeError> {
    check_range("second offset", ms, 0, SECOND_MS - 1)?;
    Ok(offset_to_millisecond_unchecked(ms))
}

/// Milliseconds to add to local wall-clock time to get UTC.
///
/// The sign is the inverse of the usual "hours ahead of UTC" reading: local
/// time at UTC+2 is two hours later, so two hours come off.
pub const fn timezone_offset_to_ms_unchecked(hours: i32) -> i64 {
    -(hours as i64) * HOUR_MS
}

/// # Errors
/// Returns `RangeError` if `hours` is outside `-12..=14`.
pub fn timezone_offset_to_ms(hours: i32) -> Result<i64, RangeError> {
    check_range(
        Field::TimezoneOffset.label(),
        hours,
        MIN_TIMEZONE_OFFSET_HOURS,
        MAX_TIMEZONE_OFFSET_HOURS,
    )?;
    Ok(timezone_offset_to_ms_unchecked(hours))
}

/// Whole hours ahead of UTC; partial hours truncate toward zero.
pub const fn ms_to_timezone_offset_unchecked(ms: i64) -> i32 {
    -(ms / HOUR_MS) as i32
}

/// # Errors
/// Returns `RangeError` if `ms` corresponds to an offset outside `-12..=14` hours.
pub fn ms_to_timezone_offset(ms: i64) -> Result<i32, RangeError> {
    check_range(
        "time zone offset ms",
        ms,
        timezone_offset_to_ms_unchecked(MAX_TIMEZONE_OFFSET_HOURS),
        timezone_offset_to_ms_unchecked(MIN_TIMEZONE_OFFSET_HOURS),
    )?;
    Ok(ms_to_timezone_offset_unchecked(ms))
}

pub const fn split_day_offset_unchecked(ms: i64) -> TimeOfDay {
    let hour24 = offset_to_hour24_unchecked(ms);
    let (hour12, meridiem) = offset_to_hour12_and_meridiem_unchecked(ms);
    let within_hour = ms % HOUR_MS;
    let within_minute = within_hour % MINUTE_MS;
    TimeOfDay {
        hour24,
        hour12,
        meridiem,
        minute: offset_to_minute_unchecked(within_hour),
        second: offset_to_second_unchecked(within_minute),
        millisecond: offset_to_millisecond_unchecked(within_minute % SECOND_MS),
    }
}

/// Splits an offset within a day into all of its clock readings.
///
/// # Errors
/// Returns `RangeError` if `ms` is not within a day.
pub fn split_day_offset(ms: i64) -> Result<TimeOfDay, RangeError> {
    check_range("day offset", ms, 0, DAY_MS - 1)?;
    Ok(split_day_offset_unchecked(ms))
}
