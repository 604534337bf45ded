//! Conversion between [`Timestamp`]s and [`DateRecord`]s.
//!
//! Decoding always succeeds. Encoding has to find a way to pin down the day
//! (calendar date, ordinal date or ISO week date) and the hour, and in strict
//! mode every redundant component has to agree with the result.

use crate::config::{EncodeConfig, MissingTime};
use crate::consts::{MAX_FULL_YEAR, MAX_TIMESTAMP, MIN_FULL_YEAR, MIN_TIMESTAMP};
use crate::month::{
    month_and_day_to_offset, offset_to_month_day_unchecked, offset_to_month_unchecked,
    offset_to_ordinal_day_unchecked, ordinal_day_to_offset,
};
use crate::range::check_range;
use crate::time::{
    hour12_and_meridiem_to_offset, hour24_to_offset, millisecond_to_offset, minute_to_offset,
    second_to_offset, timezone_offset_to_ms,
};
use crate::week::{IsoWeekDate, iso_week_and_weekday_to_offset, iso_week_date_unchecked};
use crate::year::{epoch_to_year_unchecked, year_to_epoch, year_to_epoch_unchecked};
use crate::{DateError, DateRecord, Field, Meridiem, Timestamp};
use std::cmp::Reverse;
use std::fmt;
use tracing::{debug, trace};

/// Components that identify a day, in the order they are checked.
const DAY_FIELDS: [Field; 7] = [
    Field::Year,
    Field::OrdinalDay,
    Field::Month,
    Field::MonthDay,
    Field::IsoWeekYear,
    Field::IsoWeek,
    Field::Weekday,
];

/// A complete set of components that pins down a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DayPath {
    Calendar,
    Ordinal,
    IsoWeek,
}

impl DayPath {
    const PRIORITY: [Self; 3] = [Self::Calendar, Self::Ordinal, Self::IsoWeek];

    /// The component blamed when this path disagrees with an earlier one.
    const fn lead(self) -> Field {
        match self {
            Self::Calendar => Field::Month,
            Self::Ordinal => Field::OrdinalDay,
            Self::IsoWeek => Field::IsoWeek,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Calendar => "calendar date",
            Self::Ordinal => "ordinal date",
            Self::IsoWeek => "ISO week date",
        }
    }

    fn fields(self, record: &DateRecord) -> Vec<Field> {
        match self {
            Self::Calendar => vec![Field::Year, Field::Month, Field::MonthDay],
            Self::Ordinal => vec![Field::Year, Field::OrdinalDay],
            Self::IsoWeek => vec![iso_year_field(record), Field::IsoWeek, Field::Weekday],
        }
    }

    /// Timestamp of the start of the day, or `None` if a component is absent.
    fn resolve(self, record: &DateRecord) -> Option<Result<i64, DateError>> {
        match self {
            Self::Calendar => {
                let year = record.get(Field::Year)?;
                let month = record.get(Field::Month)?;
                let month_day = record.get(Field::MonthDay)?;
                Some(calendar_day(year, month, month_day))
            }
            Self::Ordinal => {
                let year = record.get(Field::Year)?;
                let ordinal = record.get(Field::OrdinalDay)?;
                Some(ordinal_day(year, ordinal))
            }
            Self::IsoWeek => {
                let field = iso_year_field(record);
                let week_year = record.get(field)?;
                let iso_week = record.get(Field::IsoWeek)?;
                let weekday = record.get(Field::Weekday)?;
                Some(iso_week_day(field, week_year, iso_week, weekday))
            }
        }
    }
}

/// The ISO path numbers weeks within the ISO week year when there is one,
/// otherwise within the Gregorian year.
fn iso_year_field(record: &DateRecord) -> Field {
    if record.get(Field::IsoWeekYear).is_some() {
        Field::IsoWeekYear
    } else {
        Field::Year
    }
}

fn calendar_day(year: i32, month: i32, month_day: i32) -> Result<i64, DateError> {
    let start = year_to_epoch(year)?;
    Ok(start.year_start_ms + month_and_day_to_offset(month, month_day, start.is_leap_year)?)
}

fn ordinal_day(year: i32, ordinal: i32) -> Result<i64, DateError> {
    let start = year_to_epoch(year)?;
    Ok(start.year_start_ms + ordinal_day_to_offset(ordinal, start.is_leap_year)?)
}

fn iso_week_day(field: Field, week_year: i32, iso_week: i32, weekday: i32) -> Result<i64, DateError> {
    // An ISO week year reaches one year past either end of the Gregorian range.
    let (min, max) = if field == Field::IsoWeekYear {
        (MIN_FULL_YEAR - 1, MAX_FULL_YEAR + 1)
    } else {
        (MIN_FULL_YEAR, MAX_FULL_YEAR)
    };
    check_range(field.label(), week_year, min, max)?;
    let start = year_to_epoch_unchecked(week_year);
    let offset = iso_week_and_weekday_to_offset(iso_week, weekday, start.first_day_weekday(), start.is_leap_year)?;
    Ok(start.year_start_ms + offset)
}

/// Every day component of the day starting at a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DayFacts {
    pub(crate) year: i32,
    pub(crate) ordinal_day: i32,
    pub(crate) month: i32,
    pub(crate) month_day: i32,
    pub(crate) iso: IsoWeekDate,
}

impl DayFacts {
    pub(crate) fn of(day_start_ms: i64) -> Self {
        let split = epoch_to_year_unchecked(day_start_ms);
        let span = offset_to_month_unchecked(split.remainder_ms, split.is_leap_year);
        Self {
            year: split.year,
            ordinal_day: offset_to_ordinal_day_unchecked(split.remainder_ms),
            month: span.month,
            month_day: offset_to_month_day_unchecked(split.remainder_ms, span.month_start_ms),
            iso: iso_week_date_unchecked(split.year, &split.start(), split.remainder_ms),
        }
    }

    const fn value(&self, field: Field) -> Option<i32> {
        match field {
            Field::Year => Some(self.year),
            Field::OrdinalDay => Some(self.ordinal_day),
            Field::Month => Some(self.month),
            Field::MonthDay => Some(self.month_day),
            Field::IsoWeekYear => Some(self.iso.iso_week_year),
            Field::IsoWeek => Some(self.iso.iso_week),
            Field::Weekday => Some(self.iso.weekday),
            _ => None,
        }
    }

    /// The ISO week of this day when weeks are numbered within Gregorian
    /// `year`, as the ISO path does without an ISO week year. Days that belong
    /// to a neighbouring ISO year have no such week.
    const fn iso_week_within(&self, year: i32) -> Option<i32> {
        if self.iso.iso_week_year == year {
            Some(self.iso.iso_week)
        } else {
            None
        }
    }
}

impl fmt::Display for DayFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}-{:02}", self.month, self.month_day)
    }
}

/// Four digits for years `0..=9999`, otherwise a sign and six digits.
pub(crate) fn write_year(f: &mut fmt::Formatter<'_>, year: i32) -> fmt::Result {
    if (0..=9999).contains(&year) {
        write!(f, "{year:04}")
    } else {
        write!(f, "{year:+07}")
    }
}

fn positions(fields: impl IntoIterator<Item = Field>) -> Vec<Field> {
    let mut fields: Vec<Field> = fields.into_iter().collect();
    fields.sort_unstable();
    fields.dedup();
    fields
}

fn insufficient_day(record: &DateRecord) -> DateError {
    let has_year = record.get(Field::Year).is_some() || record.get(Field::IsoWeekYear).is_some();
    // Name the path closest to completion, preferring the one with the most
    // components already given.
    let missing = if has_year {
        DayPath::PRIORITY
            .iter()
            .map(|path| {
                let (present, missing): (Vec<Field>, Vec<Field>) = path
                    .fields(record)
                    .into_iter()
                    .partition(|&field| record.get(field).is_some());
                (missing, present.len())
            })
            .min_by_key(|(missing, present)| (missing.len(), Reverse(*present)))
            .map(|(missing, _)| missing)
            .unwrap_or_default()
    } else {
        vec![Field::Year]
    };
    let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
    DateError::InvalidComponents {
        message: format!("cannot resolve a day without {}", labels.join(", ")),
        missing,
    }
}

/// Present day components outside the resolving path must describe the
/// resolved day.
fn check_day_constraints(record: &DateRecord, path: DayPath, day_start_ms: i64) -> Result<(), DateError> {
    let path_fields = path.fields(record);
    let facts = DayFacts::of(day_start_ms);
    for field in DAY_FIELDS {
        if path_fields.contains(&field) {
            continue;
        }
        let Some(value) = record.get(field) else {
            continue;
        };
        let expected = match field {
            Field::IsoWeek if iso_year_field(record) == Field::Year => {
                record.get(Field::Year).and_then(|year| facts.iso_week_within(year))
            }
            _ => facts.value(field),
        };
        if expected != Some(value) {
            return Err(DateError::InvalidComponent {
                component: field,
                positions: positions(path_fields.iter().copied().chain([field])),
                message: format!("{field} {value} does not match {} {facts}", path.name()),
            });
        }
    }
    Ok(())
}

/// Finds the start of the day the record describes.
pub(crate) fn resolve_day(record: &DateRecord, config: &EncodeConfig) -> Result<(DayPath, i64), DateError> {
    let mut resolved: Option<(DayPath, i64)> = None;
    for path in DayPath::PRIORITY {
        let Some(day) = path.resolve(record) else {
            continue;
        };
        let day = day?;
        match resolved {
            None if !config.is_strict() => return Ok((path, day)),
            None => resolved = Some((path, day)),
            Some((first, first_day)) if first_day != day => {
                return Err(DateError::InvalidComponent {
                    component: path.lead(),
                    positions: positions(path.fields(record).into_iter().chain(first.fields(record))),
                    message: format!(
                        "{} {} disagrees with {} {}",
                        path.name(),
                        DayFacts::of(day),
                        first.name(),
                        DayFacts::of(first_day)
                    ),
                });
            }
            Some(_) => {}
        }
    }

    let (path, day) = resolved.ok_or_else(|| insufficient_day(record))?;
    check_day_constraints(record, path, day)?;
    Ok((path, day))
}

fn hour_mismatch(fields: impl IntoIterator<Item = Field>, component: Field, message: String) -> DateError {
    DateError::InvalidComponent {
        component,
        positions: positions(fields),
        message,
    }
}

/// Offset of the hour within the day.
fn resolve_hour(record: &DateRecord, config: &EncodeConfig) -> Result<i64, DateError> {
    let hour24 = record.get(Field::Hour24);
    let hour12 = record.get(Field::Hour12);
    let meridiem = record.get(Field::Meridiem).and_then(Meridiem::from_offset_hours);

    match (hour24, hour12, meridiem) {
        (Some(hour24), hour12, meridiem) => {
            let ms = hour24_to_offset(hour24)?;
            if config.is_strict() {
                let expected = Meridiem::of_hour24(hour24);
                if let Some(meridiem) = meridiem {
                    if meridiem != expected {
                        return Err(hour_mismatch(
                            [Field::Hour24, Field::Meridiem],
                            Field::Meridiem,
                            format!("meridiem {meridiem} does not match hour {hour24}"),
                        ));
                    }
                }
                if let Some(hour12) = hour12 {
                    if hour12_and_meridiem_to_offset(hour12, expected)? != ms {
                        let with_meridiem = meridiem.map(|_| Field::Meridiem);
                        return Err(hour_mismatch(
                            [Field::Hour24, Field::Hour12].into_iter().chain(with_meridiem),
                            Field::Hour12,
                            format!("hour {hour12} {expected} does not match hour {hour24}"),
                        ));
                    }
                }
            }
            Ok(ms)
        }
        (None, Some(hour12), Some(meridiem)) => Ok(hour12_and_meridiem_to_offset(hour12, meridiem)?),
        (None, Some(_), None) => Err(DateError::InvalidComponents {
            missing: vec![Field::Meridiem],
            message: "a 12 hour clock reading needs a meridiem".to_owned(),
        }),
        (None, None, Some(_)) => Err(DateError::InvalidComponents {
            missing: vec![Field::Hour12],
            message: "a meridiem needs a 12 hour clock reading".to_owned(),
        }),
        (None, None, None) => match config.missing_time() {
            MissingTime::Midnight => Ok(0),
            MissingTime::Reject => Err(DateError::InvalidComponents {
                missing: vec![Field::Hour24],
                message: "cannot resolve a time without an hour".to_owned(),
            }),
        },
    }
}

fn encode_components(record: &DateRecord, config: &EncodeConfig) -> Result<Timestamp, DateError> {
    let (path, day) = resolve_day(record, config)?;
    trace!(?path, day_start_ms = day, "resolved day");

    let time = resolve_hour(record, config)?
        + minute_to_offset(record.get(Field::Minute).unwrap_or(0))?
        + second_to_offset(record.get(Field::Second).unwrap_or(0))?
        + millisecond_to_offset(record.get(Field::Millisecond).unwrap_or(0))?;
    let offset_ms = timezone_offset_to_ms(record.get(Field::TimezoneOffset).unwrap_or(0))?;

    Ok(Timestamp::new(day + time + offset_ms)?)
}

/// Decodes a timestamp into a record with every component computed.
///
/// The record keeps the timestamp, so encoding it again is exact.
pub fn decode(timestamp: Timestamp) -> DateRecord {
    let mut record = DateRecord::from_timestamp(timestamp);
    record.resolve();
    record
}

/// Decodes a timestamp into wall-clock components at `offset_hours` ahead of
/// UTC.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the offset is outside `-12..=14` or the
/// local time falls outside the supported range.
pub fn decode_in_offset(timestamp: Timestamp, offset_hours: i32) -> Result<DateRecord, DateError> {
    let mut record = DateRecord::from_timestamp_in_offset(timestamp, offset_hours)?;
    record.resolve();
    Ok(record)
}

pub(crate) fn check_local_time(timestamp: Timestamp, offset_hours: i32) -> Result<i64, DateError> {
    let offset_ms = timezone_offset_to_ms(offset_hours)?;
    Ok(check_range("local time", timestamp.get() - offset_ms, MIN_TIMESTAMP, MAX_TIMESTAMP)?)
}

/// Encodes a record with the default [`EncodeConfig`].
///
/// # Errors
/// See [`encode_with`].
pub fn encode(record: &DateRecord) -> Result<Timestamp, DateError> {
    encode_with(record, &EncodeConfig::default())
}

/// Encodes a record into a timestamp.
///
/// A record that still holds its timestamp returns it unchanged. Otherwise
/// the day comes from the calendar date, the ordinal date or the ISO week
/// date, and the time from the hour (24 or 12 hour clock) plus the minute,
/// second and millisecond. Absent minutes, seconds, milliseconds and time
/// zone offset count as zero.
///
/// # Errors
/// - `DateError::InvalidComponents` if no day can be resolved, or if the hour
///   is incomplete.
/// - `DateError::InvalidComponent` if, in strict mode, two components
///   describe different days or hours.
/// - `DateError::OutOfRange` if a component used is out of range, or the
///   result is outside `MIN_TIMESTAMP..=MAX_TIMESTAMP`.
#[tracing::instrument(level = "trace", skip_all)]
pub fn encode_with(record: &DateRecord, config: &EncodeConfig) -> Result<Timestamp, DateError> {
    if let Some(timestamp) = record.cached_timestamp() {
        return Ok(timestamp);
    }
    encode_components(record, config).inspect_err(|error| debug!(%error, "rejected date record"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Coherence;
    use crate::consts::{DAY_MS, HOUR_MS};
    use crate::range::RangeError;

    const JULY_4_2024: i64 = 1_720_051_200_000;

    fn ts(ms: i64) -> Timestamp {
        Timestamp::new(ms).unwrap()
    }

    #[test]
    fn test_decode_fills_every_component() {
        let record = decode(ts(1_709_214_330_250));
        for field in Field::ALL {
            assert!(record.get(field).is_some(), "{field} should be present");
            assert!(!record.is_explicit(field));
        }
        assert_eq!(record.get(Field::Year), Some(2024));
        assert_eq!(record.get(Field::Month), Some(2));
        assert_eq!(record.get(Field::MonthDay), Some(29));
        assert_eq!(record.get(Field::OrdinalDay), Some(60));
        assert_eq!(record.get(Field::Weekday), Some(4));
        assert_eq!(record.get(Field::Hour24), Some(13));
        assert_eq!(record.get(Field::Hour12), Some(1));
        assert_eq!(record.get(Field::Meridiem), Some(12));
        assert_eq!(record.get(Field::Minute), Some(45));
        assert_eq!(record.get(Field::Second), Some(30));
        assert_eq!(record.get(Field::Millisecond), Some(250));
        assert_eq!(record.get(Field::TimezoneOffset), Some(0));
        assert_eq!(record.cached_timestamp(), Some(ts(1_709_214_330_250)));
    }

    #[test]
    fn test_decode_iso_week_year_crosses_years() {
        let record = decode(ts(1_609_459_200_000));
        assert_eq!(record.get(Field::Year), Some(2021));
        assert_eq!(record.get(Field::IsoWeekYear), Some(2020));
        assert_eq!(record.get(Field::IsoWeek), Some(53));
        assert_eq!(record.get(Field::Weekday), Some(5));
    }

    #[test]
    fn test_decode_extremes() {
        let min = decode(Timestamp::MIN);
        assert_eq!(min.get(Field::Year), Some(MIN_FULL_YEAR));
        assert_eq!(min.get(Field::OrdinalDay), Some(1));

        let max = decode(Timestamp::MAX);
        assert_eq!(max.get(Field::Year), Some(MAX_FULL_YEAR));
        assert_eq!(max.get(Field::Month), Some(12));
        assert_eq!(max.get(Field::MonthDay), Some(31));
        assert_eq!(max.get(Field::Millisecond), Some(999));
    }

    #[test]
    fn test_decode_in_offset() {
        // 2024-07-04T20:30Z is 22:30 two hours east of UTC.
        let utc = ts(1_720_125_000_000);
        let record = decode_in_offset(utc, 2).unwrap();
        assert_eq!(record.get(Field::Hour24), Some(22));
        assert_eq!(record.get(Field::Minute), Some(30));
        assert_eq!(record.get(Field::TimezoneOffset), Some(2));

        // 2024-12-31T23:00Z is already 2025 one hour east.
        let record = decode_in_offset(ts(1_735_686_000_000), 1).unwrap();
        assert_eq!(record.get(Field::Year), Some(2025));
        assert_eq!(record.get(Field::Hour24), Some(0));

        assert!(matches!(
            decode_in_offset(utc, 15),
            Err(DateError::OutOfRange(RangeError {
                label: "time zone offset",
                ..
            }))
        ));
        assert!(decode_in_offset(Timestamp::MAX, 1).is_err());
        assert!(decode_in_offset(Timestamp::MIN, -1).is_err());
    }

    #[test]
    fn test_encode_returns_cached_timestamp() {
        let record = decode(ts(-1));
        assert_eq!(encode(&record), Ok(ts(-1)));
    }

    #[test]
    fn test_encode_day_paths() {
        struct TestCase {
            record:      DateRecord,
            expected:    i64,
            description: &'static str,
        }

        let cases = [
            TestCase {
                record:      DateRecord::new().with_year(2024).with_month(7).with_month_day(4),
                expected:    JULY_4_2024,
                description: "calendar date",
            },
            TestCase {
                record:      DateRecord::new().with_year(2024).with_ordinal_day(186),
                expected:    JULY_4_2024,
                description: "ordinal date",
            },
            TestCase {
                record:      DateRecord::new().with_year(2024).with_iso_week(27).with_weekday(4),
                expected:    JULY_4_2024,
                description: "ISO week date in the Gregorian year",
            },
            TestCase {
                record:      DateRecord::new().with_iso_week_year(2020).with_iso_week(53).with_weekday(5),
                expected:    1_609_459_200_000,
                description: "ISO week date in the previous ISO year",
            },
            TestCase {
                record:      DateRecord::new().with_year(2020).with_iso_week(1).with_weekday(1),
                expected:    1_577_664_000_000,
                description: "first ISO week starting in December",
            },
            TestCase {
                record:      DateRecord::new()
                    .with_year(2024)
                    .with_month(2)
                    .with_month_day(29)
                    .with_hour24(13)
                    .with_minute(45)
                    .with_second(30)
                    .with_millisecond(250),
                expected:    1_709_214_330_250,
                description: "calendar date and time",
            },
            TestCase {
                record:      DateRecord::new()
                    .with_year(2024)
                    .with_month(7)
                    .with_month_day(4)
                    .with_hour12(10)
                    .with_meridiem(Meridiem::Pm)
                    .with_minute(30)
                    .with_timezone_offset(2),
                expected:    1_720_125_000_000,
                description: "12 hour clock east of UTC",
            },
        ];

        for case in &cases {
            assert_eq!(encode(&case.record), Ok(ts(case.expected)), "{}", case.description);
        }
    }

    #[test]
    fn test_encode_missing_year() {
        let record = DateRecord::new().with_month(3).with_month_day(1);
        assert_eq!(
            encode(&record),
            Err(DateError::InvalidComponents {
                missing: vec![Field::Year],
                message: "cannot resolve a day without year".to_owned(),
            })
        );
    }

    #[test]
    fn test_encode_names_closest_path() {
        struct TestCase {
            record:  DateRecord,
            missing: Vec<Field>,
        }

        let cases = [
            TestCase {
                record:  DateRecord::new().with_year(2024),
                missing: vec![Field::OrdinalDay],
            },
            TestCase {
                record:  DateRecord::new().with_year(2024).with_month(3),
                missing: vec![Field::MonthDay],
            },
            TestCase {
                record:  DateRecord::new().with_year(2024).with_weekday(3),
                missing: vec![Field::IsoWeek],
            },
            TestCase {
                record:  DateRecord::new().with_iso_week_year(2024).with_iso_week(3),
                missing: vec![Field::Weekday],
            },
        ];

        for case in &cases {
            match encode(&case.record) {
                Err(DateError::InvalidComponents { missing, .. }) => assert_eq!(missing, case.missing),
                other => panic!("expected InvalidComponents, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_encode_detects_incoherent_paths() {
        // Day 60 of 2024 is Feb 29, not Mar 1.
        let record = DateRecord::new()
            .with_year(2024)
            .with_ordinal_day(60)
            .with_month(3)
            .with_month_day(1);
        assert_eq!(
            encode(&record),
            Err(DateError::InvalidComponent {
                component: Field::OrdinalDay,
                positions: vec![Field::Year, Field::OrdinalDay, Field::Month, Field::MonthDay],
                message: "ordinal date 2024-02-29 disagrees with calendar date 2024-03-01".to_owned(),
            })
        );

        let first_path = EncodeConfig::new().with_coherence(Coherence::FirstPath);
        assert_eq!(encode_with(&record, &first_path), Ok(ts(1_709_251_200_000)));
    }

    #[test]
    fn test_encode_accepts_agreeing_paths() {
        let record = DateRecord::new()
            .with_year(2024)
            .with_ordinal_day(186)
            .with_month(7)
            .with_month_day(4)
            .with_iso_week_year(2024)
            .with_iso_week(27)
            .with_weekday(4);
        assert_eq!(encode(&record), Ok(ts(JULY_4_2024)));
    }

    #[test]
    fn test_encode_checks_partial_groups() {
        // 2024-07-04 is a Thursday.
        let record = DateRecord::new()
            .with_year(2024)
            .with_month(7)
            .with_month_day(4)
            .with_weekday(5);
        match encode(&record) {
            Err(DateError::InvalidComponent {
                component,
                positions,
                message,
            }) => {
                assert_eq!(component, Field::Weekday);
                assert_eq!(positions, vec![Field::Year, Field::Month, Field::MonthDay, Field::Weekday]);
                assert_eq!(message, "weekday 5 does not match calendar date 2024-07-04");
            }
            other => panic!("expected InvalidComponent, got {other:?}"),
        }

        // A year the ISO path did not use still has to match.
        let record = DateRecord::new()
            .with_year(2021)
            .with_iso_week_year(2020)
            .with_iso_week(53)
            .with_weekday(4);
        assert!(matches!(
            encode(&record),
            Err(DateError::InvalidComponent {
                component: Field::Year,
                ..
            })
        ));
    }

    #[test]
    fn test_encode_numbers_lone_iso_week_within_year() {
        const DEC_23_2024: i64 = 1_734_912_000_000;
        const DEC_30_2024: i64 = 1_735_516_800_000;

        // Week 52 of 2024 starts on Monday Dec 23.
        let dec_23 = DateRecord::new().with_year(2024).with_month(12).with_month_day(23);
        assert_eq!(encode(&dec_23.with_iso_week(52)), Ok(ts(DEC_23_2024)));
        assert_eq!(encode(&dec_23.with_iso_week(52).with_weekday(1)), Ok(ts(DEC_23_2024)));

        // Dec 30 is in week 1 of ISO year 2025, which a bare year 2024 cannot
        // number, with or without the weekday.
        let dec_30 = DateRecord::new().with_year(2024).with_month(12).with_month_day(30);
        assert_eq!(
            encode(&dec_30.with_iso_week(1)),
            Err(DateError::InvalidComponent {
                component: Field::IsoWeek,
                positions: vec![Field::Year, Field::Month, Field::MonthDay, Field::IsoWeek],
                message: "ISO week 1 does not match calendar date 2024-12-30".to_owned(),
            })
        );
        assert!(matches!(
            encode(&dec_30.with_iso_week(1).with_weekday(1)),
            Err(DateError::InvalidComponent {
                component: Field::IsoWeek,
                ..
            })
        ));

        let with_week_year = dec_30.with_iso_week_year(2025).with_iso_week(1);
        assert_eq!(encode(&with_week_year), Ok(ts(DEC_30_2024)));
        assert_eq!(encode(&with_week_year.with_weekday(1)), Ok(ts(DEC_30_2024)));
    }

    #[test]
    fn test_encode_out_of_range_components() {
        let record = DateRecord::new().with_year(2023).with_month(2).with_month_day(29);
        assert_eq!(
            encode(&record),
            Err(DateError::OutOfRange(RangeError {
                label: "month day",
                value: 29,
                min: 1,
                max: 28,
            }))
        );

        let record = DateRecord::new().with_year(2024).with_ordinal_day(1).with_minute(60);
        assert!(matches!(
            encode(&record),
            Err(DateError::OutOfRange(RangeError { label: "minute", .. }))
        ));

        let record = DateRecord::new().with_year(MAX_FULL_YEAR + 1).with_ordinal_day(1);
        assert!(matches!(
            encode(&record),
            Err(DateError::OutOfRange(RangeError { label: "year", .. }))
        ));
    }

    #[test]
    fn test_encode_rejects_result_past_max() {
        let record = DateRecord::new()
            .with_year(MAX_FULL_YEAR)
            .with_month(12)
            .with_month_day(31)
            .with_hour24(23)
            .with_timezone_offset(-1);
        assert!(matches!(
            encode(&record),
            Err(DateError::OutOfRange(RangeError { label: "timestamp", .. }))
        ));
    }

    #[test]
    fn test_encode_iso_week_year_beyond_gregorian_range() {
        // Jan 1 of the year after the last one is a Tuesday, so its ISO week 1
        // starts on the last day of the supported range.
        let record = DateRecord::new().with_iso_week_year(MAX_FULL_YEAR + 1).with_iso_week(1).with_weekday(1);
        assert_eq!(encode(&record), Ok(ts(8_639_977_795_200_000)));

        let record = record.with_weekday(2);
        assert!(matches!(
            encode(&record),
            Err(DateError::OutOfRange(RangeError { label: "timestamp", .. }))
        ));

        let record = DateRecord::new().with_iso_week_year(MAX_FULL_YEAR + 2).with_iso_week(1).with_weekday(1);
        assert!(matches!(
            encode(&record),
            Err(DateError::OutOfRange(RangeError {
                label: "ISO week year",
                ..
            }))
        ));
    }

    #[test]
    fn test_encode_hours() {
        let day = DateRecord::new().with_year(1970).with_ordinal_day(1);

        assert_eq!(encode(&day.with_hour24(9)), Ok(ts(9 * HOUR_MS)));
        assert_eq!(encode(&day.with_hour12(0).with_meridiem(Meridiem::Pm)), Ok(ts(12 * HOUR_MS)));
        assert_eq!(
            encode(&day.with_hour24(21).with_hour12(9).with_meridiem(Meridiem::Pm)),
            Ok(ts(21 * HOUR_MS))
        );
        assert_eq!(encode(&day.with_hour24(21).with_meridiem(Meridiem::Pm)), Ok(ts(21 * HOUR_MS)));

        assert!(matches!(
            encode(&day.with_hour24(21).with_hour12(8)),
            Err(DateError::InvalidComponent {
                component: Field::Hour12,
                ..
            })
        ));
        assert!(matches!(
            encode(&day.with_hour24(9).with_meridiem(Meridiem::Pm)),
            Err(DateError::InvalidComponent {
                component: Field::Meridiem,
                ..
            })
        ));
        assert_eq!(
            encode(&day.with_hour12(9)),
            Err(DateError::InvalidComponents {
                missing: vec![Field::Meridiem],
                message: "a 12 hour clock reading needs a meridiem".to_owned(),
            })
        );
        assert!(matches!(
            encode(&day.with_meridiem(Meridiem::Am)),
            Err(DateError::InvalidComponents { .. })
        ));
        assert!(matches!(
            encode(&day.with_hour12(12).with_meridiem(Meridiem::Am)),
            Err(DateError::OutOfRange(RangeError {
                label: "hour (12 hour clock)",
                ..
            }))
        ));
    }

    #[test]
    fn test_encode_missing_time_policy() {
        let day = DateRecord::new().with_year(1970).with_ordinal_day(2);
        assert_eq!(encode(&day), Ok(ts(DAY_MS)));

        let reject = EncodeConfig::new().with_missing_time(MissingTime::Reject);
        assert!(matches!(
            encode_with(&day, &reject),
            Err(DateError::InvalidComponents { .. })
        ));
        assert_eq!(encode_with(&day.with_hour24(0), &reject), Ok(ts(DAY_MS)));
    }

    #[test]
    fn test_day_facts_display() {
        assert_eq!(DayFacts::of(JULY_4_2024).to_string(), "2024-07-04");
        assert_eq!(DayFacts::of(-62_198_755_200_000).to_string(), "-000001-01-01");
        assert_eq!(DayFacts::of(0).iso.weekday, 4);
    }
}
