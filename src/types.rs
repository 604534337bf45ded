use crate::consts::{CENTURY_CYCLE, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_TIMESTAMP, MIN_TIMESTAMP};
use crate::prelude::*;
use crate::range::{RangeError, check_range};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since 1970-01-01T00:00:00.000Z, guaranteed to be within
/// `MIN_TIMESTAMP..=MAX_TIMESTAMP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(try_from = "i64", into = "i64")]
pub struct Timestamp(i64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self(0);
    /// First millisecond of the earliest representable year.
    pub const MIN: Self = Self(MIN_TIMESTAMP);
    /// Last millisecond of the latest representable year.
    pub const MAX: Self = Self(MAX_TIMESTAMP);

    /// Creates a new Timestamp, validating that it's within
    /// `MIN_TIMESTAMP..=MAX_TIMESTAMP`
    ///
    /// # Errors
    /// Returns `RangeError` labelled `timestamp` if the value is out of bounds.
    pub fn new(ms: i64) -> Result<Self, RangeError> {
        check_range("timestamp", ms, MIN_TIMESTAMP, MAX_TIMESTAMP).map(Self)
    }

    /// Returns the millisecond count as i64
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Timestamp {
    type Error = RangeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// AM/PM flag. Its discriminant is the hour offset it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    #[display(fmt = "AM")]
    Am = 0,
    #[display(fmt = "PM")]
    Pm = 12,
}

impl Meridiem {
    /// Hours added to a 12 hour clock reading to get the 24 hour one.
    #[inline]
    pub const fn offset_hours(self) -> i32 {
        self as i32
    }

    /// The meridiem a 24 hour clock reading falls in.
    #[inline]
    pub const fn of_hour24(hour24: i32) -> Self {
        if hour24 >= 12 { Self::Pm } else { Self::Am }
    }

    pub(crate) const fn from_offset_hours(hours: i32) -> Option<Self> {
        match hours {
            0 => Some(Self::Am),
            12 => Some(Self::Pm),
            _ => None,
        }
    }
}

/// A settable component of a [`DateRecord`](crate::DateRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Year,
    OrdinalDay,
    Month,
    MonthDay,
    IsoWeekYear,
    IsoWeek,
    Weekday,
    Hour24,
    Hour12,
    Meridiem,
    Minute,
    Second,
    Millisecond,
    TimezoneOffset,
}

impl Field {
    pub const COUNT: usize = 14;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Year,
        Self::OrdinalDay,
        Self::Month,
        Self::MonthDay,
        Self::IsoWeekYear,
        Self::IsoWeek,
        Self::Weekday,
        Self::Hour24,
        Self::Hour12,
        Self::Meridiem,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
        Self::TimezoneOffset,
    ];

    /// The name used for this component in diagnostics.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::OrdinalDay => "ordinal day",
            Self::Month => "month",
            Self::MonthDay => "month day",
            Self::IsoWeekYear => "ISO week year",
            Self::IsoWeek => "ISO week",
            Self::Weekday => "weekday",
            Self::Hour24 => "hour",
            Self::Hour12 => "hour (12 hour clock)",
            Self::Meridiem => "meridiem",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::TimezoneOffset => "time zone offset",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value of a [`DateRecord`](crate::DateRecord) that is computed from its
/// components and cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Derived {
    /// Timestamp of Jan 1, 00:00:00.000 of the year.
    YearStartMs,
    /// `YearStartMs` reduced into the 400 year cycle starting at 2001.
    YearStartMsModulo400Y,
    /// 1 for leap years, 0 otherwise.
    IsLeapYear,
    FirstDayOfYearWeekday,
    /// Offset of the first ISO week's Monday from the year start.
    FirstIsoWeekOffsetMs,
    /// Offset of the month's first day from the year start.
    MonthStartMs,
    /// Offset of the ISO week's Monday from the year start.
    IsoWeekStartMs,
    /// Offset of the day from the year start.
    DayMs,
    HourMs,
    MinuteMs,
    SecondMs,
    MillisecondMs,
    /// Milliseconds added to local wall-clock time to get UTC.
    TimezoneOffsetMs,
}

impl Derived {
    pub const COUNT: usize = 13;

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// A set of [`Field`]s, one bit each.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct FieldSet(u16);

impl FieldSet {
    #[inline]
    pub(crate) const fn contains(self, field: Field) -> bool {
        self.0 & (1 << field.index()) != 0
    }

    #[inline]
    pub(crate) const fn insert(&mut self, field: Field) {
        self.0 |= 1 << field.index();
    }

    #[inline]
    pub(crate) const fn remove(&mut self, field: Field) {
        self.0 &= !(1 << field.index());
    }
}

// Helper functions

/// Gregorian leap year rule, extended proleptically to year 0 and below.
pub const fn is_leap_year(year: i32) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}
