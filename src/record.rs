//! A date held as individually optional components.
//!
//! Components are either *explicit* (given through a setter) or *computed*
//! (decoded from a timestamp or derived from other components). Setters never
//! validate; out-of-range values surface when the record is encoded.

use crate::codec::{DayFacts, check_local_time, encode, resolve_day, write_year};
use crate::config::{Coherence, EncodeConfig};
use crate::consts::{DAY_MS, MONDAY};
use crate::month::{
    month_and_day_to_offset, offset_to_month_day_unchecked, offset_to_month_unchecked, offset_to_ordinal_day_unchecked,
};
use crate::range::RangeError;
use crate::time::{
    TimeOfDay, hour12_and_meridiem_to_offset, hour24_to_offset, hour24_to_offset_unchecked, millisecond_to_offset,
    millisecond_to_offset_unchecked, minute_to_offset, minute_to_offset_unchecked,
    offset_to_hour12_and_meridiem_unchecked, offset_to_hour24_unchecked, second_to_offset, second_to_offset_unchecked,
    split_day_offset_unchecked, timezone_offset_to_ms, timezone_offset_to_ms_unchecked,
};
use crate::week::{first_iso_week_offset_unchecked, iso_week_date_unchecked};
use crate::types::FieldSet;
use crate::year::{YearStart, epoch_to_year_unchecked, year_to_epoch};
use crate::{DateError, Derived, Field, Meridiem, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lazy derivation takes the first complete day path and never fails.
const LENIENT: EncodeConfig = EncodeConfig::new().with_coherence(Coherence::FirstPath);

/// Derived values computed from each component.
const fn dependents(field: Field) -> &'static [Derived] {
    match field {
        Field::Year => &[
            Derived::YearStartMs,
            Derived::YearStartMsModulo400Y,
            Derived::IsLeapYear,
            Derived::FirstDayOfYearWeekday,
            Derived::FirstIsoWeekOffsetMs,
            Derived::MonthStartMs,
            Derived::IsoWeekStartMs,
            Derived::DayMs,
        ],
        Field::OrdinalDay | Field::MonthDay => &[Derived::DayMs],
        Field::Month => &[Derived::MonthStartMs, Derived::DayMs],
        Field::IsoWeekYear | Field::IsoWeek | Field::Weekday => &[Derived::IsoWeekStartMs, Derived::DayMs],
        Field::Hour24 | Field::Hour12 | Field::Meridiem => &[Derived::HourMs],
        Field::Minute => &[Derived::MinuteMs],
        Field::Second => &[Derived::SecondMs],
        Field::Millisecond => &[Derived::MillisecondMs],
        Field::TimezoneOffset => &[Derived::TimezoneOffsetMs],
    }
}

/// Components expressing the same quantity as `field` through another path.
///
/// A week and weekday only compete with the Gregorian year when an ISO week
/// year is present to number them.
const fn rivals(field: Field, has_iso_week_year: bool) -> &'static [Field] {
    match field {
        Field::Year => &[Field::OrdinalDay, Field::IsoWeekYear, Field::IsoWeek, Field::Weekday],
        Field::IsoWeekYear => &[Field::Year, Field::OrdinalDay, Field::Month, Field::MonthDay],
        Field::OrdinalDay => &[
            Field::Month,
            Field::MonthDay,
            Field::IsoWeekYear,
            Field::IsoWeek,
            Field::Weekday,
        ],
        Field::Month | Field::MonthDay => &[Field::OrdinalDay, Field::IsoWeekYear, Field::IsoWeek, Field::Weekday],
        Field::IsoWeek | Field::Weekday if has_iso_week_year => {
            &[Field::Year, Field::OrdinalDay, Field::Month, Field::MonthDay]
        }
        Field::IsoWeek | Field::Weekday => &[Field::OrdinalDay, Field::Month, Field::MonthDay],
        Field::Hour24 => &[Field::Hour12, Field::Meridiem],
        Field::Hour12 | Field::Meridiem => &[Field::Hour24],
        Field::Minute | Field::Second | Field::Millisecond | Field::TimezoneOffset => &[],
    }
}

/// A partially or fully decomposed date.
///
/// Built either from a [`Timestamp`] (every component computed on demand) or
/// from [`DateRecord::new`] and the `with_*` setters, then turned into a
/// timestamp with [`encode`](crate::encode).
///
/// Equality compares components, their provenance and the cached timestamp.
/// Cached derived values are ignored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "DateRecordRepr", into = "DateRecordRepr")]
pub struct DateRecord {
    components: [Option<i32>; Field::COUNT],
    derived: [Option<i64>; Derived::COUNT],
    timestamp: Option<Timestamp>,
    explicit: FieldSet,
}

impl PartialEq for DateRecord {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components && self.timestamp == other.timestamp && self.explicit == other.explicit
    }
}

impl Eq for DateRecord {}

impl DateRecord {
    /// A record with no components.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record backed by `timestamp`. Components are computed when first read.
    pub fn from_timestamp(timestamp: Timestamp) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..Self::default()
        }
    }

    pub(crate) fn from_timestamp_in_offset(timestamp: Timestamp, offset_hours: i32) -> Result<Self, DateError> {
        check_local_time(timestamp, offset_hours)?;
        let mut record = Self::from_timestamp(timestamp);
        record.fill(Field::TimezoneOffset, offset_hours);
        Ok(record)
    }

    pub fn with_year(self, year: i32) -> Self {
        self.set(Field::Year, year)
    }

    /// Sets the 1-based day of the year.
    pub fn with_ordinal_day(self, ordinal_day: i32) -> Self {
        self.set(Field::OrdinalDay, ordinal_day)
    }

    pub fn with_month(self, month: i32) -> Self {
        self.set(Field::Month, month)
    }

    pub fn with_month_day(self, month_day: i32) -> Self {
        self.set(Field::MonthDay, month_day)
    }

    /// Sets the year that numbers the ISO week. Only needed when it differs
    /// from the Gregorian year.
    pub fn with_iso_week_year(self, iso_week_year: i32) -> Self {
        self.set(Field::IsoWeekYear, iso_week_year)
    }

    pub fn with_iso_week(self, iso_week: i32) -> Self {
        self.set(Field::IsoWeek, iso_week)
    }

    /// Sets the ISO weekday, 1 (Monday) through 7 (Sunday).
    pub fn with_weekday(self, weekday: i32) -> Self {
        self.set(Field::Weekday, weekday)
    }

    pub fn with_hour24(self, hour24: i32) -> Self {
        self.set(Field::Hour24, hour24)
    }

    /// Sets the 12 hour clock reading, 0 through 11.
    pub fn with_hour12(self, hour12: i32) -> Self {
        self.set(Field::Hour12, hour12)
    }

    pub fn with_meridiem(self, meridiem: Meridiem) -> Self {
        self.set(Field::Meridiem, meridiem.offset_hours())
    }

    pub fn with_minute(self, minute: i32) -> Self {
        self.set(Field::Minute, minute)
    }

    pub fn with_second(self, second: i32) -> Self {
        self.set(Field::Second, second)
    }

    pub fn with_millisecond(self, millisecond: i32) -> Self {
        self.set(Field::Millisecond, millisecond)
    }

    /// Sets the offset of local time from UTC in whole hours, -12 through 14.
    pub fn with_timezone_offset(self, hours: i32) -> Self {
        self.set(Field::TimezoneOffset, hours)
    }

    /// Stores an explicit component. The cached timestamp and anything computed
    /// from the old value are dropped.
    fn set(mut self, field: Field, value: i32) -> Self {
        self.components[field.index()] = Some(value);
        self.explicit.insert(field);
        self.timestamp = None;
        self.invalidate(field);

        let has_iso_week_year = self.components[Field::IsoWeekYear.index()].is_some();
        for &rival in rivals(field, has_iso_week_year) {
            if !self.explicit.contains(rival) && self.components[rival.index()].take().is_some() {
                self.invalidate(rival);
            }
        }
        self
    }

    fn invalidate(&mut self, field: Field) {
        for &derived in dependents(field) {
            self.derived[derived.index()] = None;
        }
    }

    /// Stores a computed component unless one is already present.
    fn fill(&mut self, field: Field, value: i32) {
        let slot = &mut self.components[field.index()];
        if slot.is_none() {
            *slot = Some(value);
            self.explicit.remove(field);
        }
    }

    fn fill_derived(&mut self, derived: Derived, value: i64) {
        self.derived[derived.index()].get_or_insert(value);
    }

    /// The component's current value, without computing anything.
    pub const fn get(&self, field: Field) -> Option<i32> {
        self.components[field.index()]
    }

    /// The derived value if it has been computed.
    pub const fn get_derived(&self, derived: Derived) -> Option<i64> {
        self.derived[derived.index()]
    }

    /// The timestamp the record was decoded from or last encoded to, if no
    /// component has been set since.
    pub const fn cached_timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// Whether the component was given through a setter.
    pub const fn is_explicit(&self, field: Field) -> bool {
        self.explicit.contains(field) && self.components[field.index()].is_some()
    }

    /// Present components in [`Field`] order.
    pub fn components(&self) -> impl Iterator<Item = (Field, i32)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }

    /// Reads a component, computing it from the rest of the record if needed.
    pub fn component(&mut self, field: Field) -> Option<i32> {
        if self.get(field).is_none() {
            self.resolve();
        }
        self.get(field)
    }

    /// Reads a derived value, computing it if needed.
    pub fn derived(&mut self, derived: Derived) -> Option<i64> {
        if self.get_derived(derived).is_none() {
            self.resolve();
        }
        self.get_derived(derived)
    }

    pub fn year(&mut self) -> Option<i32> {
        self.component(Field::Year)
    }

    pub fn ordinal_day(&mut self) -> Option<i32> {
        self.component(Field::OrdinalDay)
    }

    pub fn month(&mut self) -> Option<i32> {
        self.component(Field::Month)
    }

    pub fn month_day(&mut self) -> Option<i32> {
        self.component(Field::MonthDay)
    }

    pub fn iso_week_year(&mut self) -> Option<i32> {
        self.component(Field::IsoWeekYear)
    }

    pub fn iso_week(&mut self) -> Option<i32> {
        self.component(Field::IsoWeek)
    }

    pub fn weekday(&mut self) -> Option<i32> {
        self.component(Field::Weekday)
    }

    pub fn hour24(&mut self) -> Option<i32> {
        self.component(Field::Hour24)
    }

    pub fn hour12(&mut self) -> Option<i32> {
        self.component(Field::Hour12)
    }

    pub fn meridiem(&mut self) -> Option<Meridiem> {
        self.component(Field::Meridiem).and_then(Meridiem::from_offset_hours)
    }

    pub fn minute(&mut self) -> Option<i32> {
        self.component(Field::Minute)
    }

    pub fn second(&mut self) -> Option<i32> {
        self.component(Field::Second)
    }

    pub fn millisecond(&mut self) -> Option<i32> {
        self.component(Field::Millisecond)
    }

    pub fn timezone_offset(&mut self) -> Option<i32> {
        self.component(Field::TimezoneOffset)
    }

    pub fn is_leap_year(&mut self) -> Option<bool> {
        self.derived(Derived::IsLeapYear).map(|leap| leap != 0)
    }

    /// Encodes the record with the default configuration and caches the
    /// result. `None` if the record does not encode.
    pub fn timestamp(&mut self) -> Option<Timestamp> {
        if self.timestamp.is_none() {
            self.timestamp = encode(self).ok();
        }
        self.timestamp
    }

    /// Computes every absent component and derived value that the record
    /// determines. Present components are never changed.
    pub fn resolve(&mut self) {
        if let Some(timestamp) = self.timestamp {
            let offset_hours = self.get(Field::TimezoneOffset).unwrap_or(0);
            let offset_ms = timezone_offset_to_ms_unchecked(offset_hours);
            self.fill(Field::TimezoneOffset, offset_hours);
            self.fill_derived(Derived::TimezoneOffsetMs, offset_ms);
            self.fill_from_local_time(timestamp.get() - offset_ms);
            return;
        }

        self.resolve_time();
        if let Ok((_, day_start_ms)) = resolve_day(self, &LENIENT) {
            let split = epoch_to_year_unchecked(day_start_ms);
            // An explicit year that contradicts the ISO path is left for
            // encode to report.
            if self.get(Field::Year).is_none_or(|year| year == split.year) {
                let start = split.start();
                self.fill(Field::Year, split.year);
                self.fill_year_facts(&start);
                self.fill_day(split.year, &start, split.remainder_ms);
            }
        } else if let Some(start) = self.get(Field::Year).and_then(|year| year_to_epoch(year).ok()) {
            self.fill_year_facts(&start);
            let month_start = self
                .get(Field::Month)
                .and_then(|month| month_and_day_to_offset(month, 1, start.is_leap_year).ok());
            if let Some(month_start_ms) = month_start {
                self.fill_derived(Derived::MonthStartMs, month_start_ms);
            }
        }
    }

    fn resolve_time(&mut self) {
        if let Some(hour24) = self.get(Field::Hour24) {
            if let Ok(hour_ms) = hour24_to_offset(hour24) {
                let (hour12, meridiem) = offset_to_hour12_and_meridiem_unchecked(hour_ms);
                self.fill(Field::Hour12, hour12);
                self.fill(Field::Meridiem, meridiem.offset_hours());
                self.fill_derived(Derived::HourMs, hour_ms);
            }
        } else if let (Some(hour12), Some(meridiem)) = (
            self.get(Field::Hour12),
            self.get(Field::Meridiem).and_then(Meridiem::from_offset_hours),
        ) {
            if let Ok(hour_ms) = hour12_and_meridiem_to_offset(hour12, meridiem) {
                self.fill(Field::Hour24, offset_to_hour24_unchecked(hour_ms));
                self.fill_derived(Derived::HourMs, hour_ms);
            }
        }

        let conversions: [(Field, Derived, fn(i32) -> Result<i64, RangeError>); 4] = [
            (Field::Minute, Derived::MinuteMs, minute_to_offset),
            (Field::Second, Derived::SecondMs, second_to_offset),
            (Field::Millisecond, Derived::MillisecondMs, millisecond_to_offset),
            (Field::TimezoneOffset, Derived::TimezoneOffsetMs, timezone_offset_to_ms),
        ];
        for (field, derived, to_offset) in conversions {
            if let Some(ms) = self.get(field).and_then(|value| to_offset(value).ok()) {
                self.fill_derived(derived, ms);
            }
        }
    }

    fn fill_year_facts(&mut self, start: &YearStart) {
        let first_day = start.first_day_weekday();
        self.fill_derived(Derived::YearStartMs, start.year_start_ms);
        self.fill_derived(Derived::YearStartMsModulo400Y, start.year_start_ms_modulo_400y);
        self.fill_derived(Derived::IsLeapYear, i64::from(start.is_leap_year));
        self.fill_derived(Derived::FirstDayOfYearWeekday, i64::from(first_day));
        self.fill_derived(Derived::FirstIsoWeekOffsetMs, first_iso_week_offset_unchecked(first_day));
    }

    /// Fills the day components of the day `day_ms` after the start of `year`.
    fn fill_day(&mut self, year: i32, start: &YearStart, day_ms: i64) {
        let span = offset_to_month_unchecked(day_ms, start.is_leap_year);
        let iso = iso_week_date_unchecked(year, start, day_ms);

        self.fill(Field::OrdinalDay, offset_to_ordinal_day_unchecked(day_ms));
        self.fill(Field::Month, span.month);
        self.fill(Field::MonthDay, offset_to_month_day_unchecked(day_ms, span.month_start_ms));
        self.fill(Field::IsoWeekYear, iso.iso_week_year);
        self.fill(Field::IsoWeek, iso.iso_week);
        self.fill(Field::Weekday, iso.weekday);

        if self.get(Field::Month) == Some(span.month) {
            self.fill_derived(Derived::MonthStartMs, span.month_start_ms);
        }
        self.fill_derived(Derived::DayMs, day_ms);
        self.fill_derived(Derived::IsoWeekStartMs, day_ms - i64::from(iso.weekday - MONDAY) * DAY_MS);
    }

    fn fill_time(&mut self, time: &TimeOfDay) {
        self.fill(Field::Hour24, time.hour24);
        self.fill(Field::Hour12, time.hour12);
        self.fill(Field::Meridiem, time.meridiem.offset_hours());
        self.fill(Field::Minute, time.minute);
        self.fill(Field::Second, time.second);
        self.fill(Field::Millisecond, time.millisecond);
        self.fill_derived(Derived::HourMs, hour24_to_offset_unchecked(time.hour24));
        self.fill_derived(Derived::MinuteMs, minute_to_offset_unchecked(time.minute));
        self.fill_derived(Derived::SecondMs, second_to_offset_unchecked(time.second));
        self.fill_derived(Derived::MillisecondMs, millisecond_to_offset_unchecked(time.millisecond));
    }

    fn fill_from_local_time(&mut self, local_ms: i64) {
        let split = epoch_to_year_unchecked(local_ms);
        let start = split.start();
        let time_ms = split.remainder_ms % DAY_MS;

        self.fill(Field::Year, split.year);
        self.fill_year_facts(&start);
        self.fill_day(split.year, &start, split.remainder_ms - time_ms);
        self.fill_time(&split_day_offset_unchecked(time_ms));
    }
}

impl fmt::Display for DateRecord {
    /// ISO-8601 extended format in the record's own time zone, or the present
    /// components if the record does not encode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset_hours = self.get(Field::TimezoneOffset).unwrap_or(0);
        let local = encode(self).and_then(|timestamp| check_local_time(timestamp, offset_hours));

        let Ok(local_ms) = local else {
            f.write_str("unresolved date")?;
            let mut components = self.components().peekable();
            if components.peek().is_none() {
                return Ok(());
            }
            f.write_str(" (")?;
            for (i, (field, value)) in components.enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match Meridiem::from_offset_hours(value).filter(|_| field == Field::Meridiem) {
                    Some(meridiem) => write!(f, "{field} {meridiem}")?,
                    None => write!(f, "{field} {value}")?,
                }
            }
            return f.write_str(")");
        };

        let day_ms = local_ms.div_euclid(DAY_MS) * DAY_MS;
        let day = DayFacts::of(day_ms);
        let time = split_day_offset_unchecked(local_ms - day_ms);
        write_year(f, day.year)?;
        write!(
            f,
            "-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}{:+03}:00",
            day.month, day.month_day, time.hour24, time.minute, time.second, time.millisecond, offset_hours
        )
    }
}

/// Serialized form: the cached timestamp plus every present component.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DateRecordRepr {
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ordinal_day: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    month_day: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iso_week_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iso_week: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weekday: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hour24: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hour12: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meridiem: Option<Meridiem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minute: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    second: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    millisecond: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone_offset: Option<i32>,
}

impl From<DateRecord> for DateRecordRepr {
    fn from(record: DateRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            year: record.get(Field::Year),
            ordinal_day: record.get(Field::OrdinalDay),
            month: record.get(Field::Month),
            month_day: record.get(Field::MonthDay),
            iso_week_year: record.get(Field::IsoWeekYear),
            iso_week: record.get(Field::IsoWeek),
            weekday: record.get(Field::Weekday),
            hour24: record.get(Field::Hour24),
            hour12: record.get(Field::Hour12),
            meridiem: record.get(Field::Meridiem).and_then(Meridiem::from_offset_hours),
            minute: record.get(Field::Minute),
            second: record.get(Field::Second),
            millisecond: record.get(Field::Millisecond),
            timezone_offset: record.get(Field::TimezoneOffset),
        }
    }
}

impl TryFrom<DateRecordRepr> for DateRecord {
    type Error = DateError;

    /// A timestamp wins over components: the record is rebuilt from it in the
    /// stored time zone. Otherwise every component becomes explicit.
    fn try_from(repr: DateRecordRepr) -> Result<Self, Self::Error> {
        if let Some(timestamp) = repr.timestamp {
            return Self::from_timestamp_in_offset(timestamp, repr.timezone_offset.unwrap_or(0));
        }

        let mut record = Self::new();
        let setters: [(Option<i32>, fn(Self, i32) -> Self); 13] = [
            (repr.year, Self::with_year),
            (repr.ordinal_day, Self::with_ordinal_day),
            (repr.month, Self::with_month),
            (repr.month_day, Self::with_month_day),
            (repr.iso_week_year, Self::with_iso_week_year),
            (repr.iso_week, Self::with_iso_week),
            (repr.weekday, Self::with_weekday),
            (repr.hour24, Self::with_hour24),
            (repr.hour12, Self::with_hour12),
            (repr.minute, Self::with_minute),
            (repr.second, Self::with_second),
            (repr.millisecond, Self::with_millisecond),
            (repr.timezone_offset, Self::with_timezone_offset),
        ];
        for (value, setter) in setters {
            if let Some(value) = value {
                record = setter(record, value);
            }
        }
        if let Some(meridiem) = repr.meridiem {
            record = record.with_meridiem(meridiem);
        }
        Ok(record)
    }
}
