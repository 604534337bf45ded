//! Year number to epoch offset and back.
//!
//! Every computation runs a quotient/remainder cascade (400, 100, 4 and 1
//! years) against 2001-01-01. Because that cycle ends on a leap year, the leap
//! test collapses to a single expression over the remainders and never has to
//! re-test divisibility.

use crate::Field;
use crate::consts::{
    CYCLE_ANCHOR_MS, CYCLE_ANCHOR_YEAR, DAY_MS, FOUR_HUNDRED_YEARS_MS, FOUR_YEARS_MS, HUNDRED_YEARS_MS, LEAP_YEAR_MS,
    MAX_FULL_YEAR, MAX_TIMESTAMP, MIN_FULL_YEAR, MIN_TIMESTAMP, YEAR_MS,
};
use crate::range::{RangeError, check_range};
use serde::{Deserialize, Serialize};

/// Where a year begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearStart {
    /// Timestamp of Jan 1, 00:00:00.000.
    pub year_start_ms: i64,
    /// `year_start_ms` measured from the start of its 400 year cycle.
    pub year_start_ms_modulo_400y: i64,
    pub is_leap_year: bool,
}

impl YearStart {
    /// Length of the year in milliseconds.
    #[inline]
    pub const fn year_length_ms(&self) -> i64 {
        if self.is_leap_year { LEAP_YEAR_MS } else { YEAR_MS }
    }

    /// Number of days in the year.
    #[inline]
    pub const fn year_length_days(&self) -> i32 {
        (self.year_length_ms() / DAY_MS) as i32
    }

    /// ISO weekday (1 = Monday) of Jan 1.
    ///
    /// Every cycle starts on a Monday and spans a whole number of weeks, so the
    /// cycle-relative offset is all that's needed.
    #[inline]
    pub const fn first_day_weekday(&self) -> i32 {
        ((self.year_start_ms_modulo_400y / DAY_MS) % 7) as i32 + 1
    }
}

/// A timestamp split into its year and the time elapsed since that year began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearSplit {
    pub year: i32,
    pub year_start_ms: i64,
    pub year_start_ms_modulo_400y: i64,
    pub is_leap_year: bool,
    /// Milliseconds since `year_start_ms`, always non-negative.
    pub remainder_ms: i64,
}

impl YearSplit {
    #[inline]
    pub const fn start(&self) -> YearStart {
        YearStart {
            year_start_ms: self.year_start_ms,
            year_start_ms_modulo_400y: self.year_start_ms_modulo_400y,
            is_leap_year: self.is_leap_year,
        }
    }
}

#[inline]
const fn is_leap_in_cycle(year_in_quad: i64, year_in_century: i64, year_in_cycle: i64) -> bool {
    year_in_quad == 3 && (year_in_century != 99 || year_in_cycle == 399)
}

/// Computes where `year` begins without validating it.
///
/// Years outside `MIN_FULL_YEAR..=MAX_FULL_YEAR` produce timestamps outside
/// the supported range. Beyond roughly 290 million years from 2001 the
/// timestamp wraps around `i64`.
pub const fn year_to_epoch_unchecked(year: i32) -> YearStart {
    let offset = year as i64 - CYCLE_ANCHOR_YEAR as i64;
    let cycles = offset.div_euclid(400);
    let year_in_cycle = offset.rem_euclid(400);
    let centuries = year_in_cycle / 100;
    let year_in_century = year_in_cycle % 100;
    let quads = year_in_century / 4;
    let year_in_quad = year_in_century % 4;

    let modulo = centuries * HUNDRED_YEARS_MS + quads * FOUR_YEARS_MS + year_in_quad * YEAR_MS;
    YearStart {
        year_start_ms: cycles
            .wrapping_mul(FOUR_HUNDRED_YEARS_MS)
            .wrapping_add(CYCLE_ANCHOR_MS + modulo),
        year_start_ms_modulo_400y: modulo,
        is_leap_year: is_leap_in_cycle(year_in_quad, year_in_century, year_in_cycle),
    }
}

/// Computes where `year` begins.
///
/// # Errors
/// Returns `RangeError` if `year` is outside `MIN_FULL_YEAR..=MAX_FULL_YEAR`.
pub fn year_to_epoch(year: i32) -> Result<YearStart, RangeError> {
    check_range(Field::Year.label(), year, MIN_FULL_YEAR, MAX_FULL_YEAR)?;
    Ok(year_to_epoch_unchecked(year))
}

/// Finds the year containing `ms` without validating it.
///
/// Within a few hundred years of the `i64` limits the anchor subtraction
/// wraps and the result is meaningless.
pub const fn epoch_to_year_unchecked(ms: i64) -> YearSplit {
    let since_anchor = ms.wrapping_sub(CYCLE_ANCHOR_MS);
    let cycles = since_anchor.div_euclid(FOUR_HUNDRED_YEARS_MS);
    let in_cycle_ms = since_anchor.rem_euclid(FOUR_HUNDRED_YEARS_MS);
    let mut rem = in_cycle_ms;

    // The final century and the final year of a quad are one day longer, so
    // their last day would otherwise roll over into a fifth slot.
    let mut centuries = rem / HUNDRED_YEARS_MS;
    if centuries > 3 {
        centuries = 3;
    }
    rem -= centuries * HUNDRED_YEARS_MS;
    let quads = rem / FOUR_YEARS_MS;
    rem -= quads * FOUR_YEARS_MS;
    let mut year_in_quad = rem / YEAR_MS;
    if year_in_quad > 3 {
        year_in_quad = 3;
    }
    rem -= year_in_quad * YEAR_MS;

    let year_in_century = quads * 4 + year_in_quad;
    let year_in_cycle = centuries * 100 + year_in_century;
    YearSplit {
        year: (CYCLE_ANCHOR_YEAR as i64 + cycles * 400 + year_in_cycle) as i32,
        year_start_ms: ms.wrapping_sub(rem),
        year_start_ms_modulo_400y: in_cycle_ms - rem,
        is_leap_year: is_leap_in_cycle(year_in_quad, year_in_century, year_in_cycle),
        remainder_ms: rem,
    }
}

/// Finds the year containing `ms`.
///
/// # Errors
/// Returns `RangeError` if `ms` is outside `MIN_TIMESTAMP..=MAX_TIMESTAMP`.
pub fn epoch_to_year(ms: i64) -> Result<YearSplit, RangeError> {
    check_range("timestamp", ms, MIN_TIMESTAMP, MAX_TIMESTAMP)?;
    Ok(epoch_to_year_unchecked(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::is_leap_year;

    #[test]
    fn test_year_to_epoch_known_years() {
        struct TestCase {
            year:          i32,
            year_start_ms: i64,
            is_leap:       bool,
        }

        let cases = [
            TestCase {
                year:          1970,
                year_start_ms: 0,
                is_leap:       false,
            },
            TestCase {
                year:          2001,
                year_start_ms: 978_307_200_000,
                is_leap:       false,
            },
            TestCase {
                year:          2000,
                year_start_ms: 946_684_800_000,
                is_leap:       true,
            },
            TestCase {
                year:          2024,
                year_start_ms: 1_704_067_200_000,
                is_leap:       true,
            },
            TestCase {
                year:          1900,
                year_start_ms: -2_208_988_800_000,
                is_leap:       false,
            },
            TestCase {
                year:          1,
                year_start_ms: -62_135_596_800_000,
                is_leap:       false,
            },
            TestCase {
                year:          0,
                year_start_ms: -62_167_219_200_000,
                is_leap:       true,
            },
        ];

        for case in &cases {
            let start = year_to_epoch(case.year).unwrap();
            assert_eq!(start.year_start_ms, case.year_start_ms, "start of {}", case.year);
            assert_eq!(start.is_leap_year, case.is_leap, "leapness of {}", case.year);
        }
    }

    #[test]
    fn test_modulo_400y() {
        assert_eq!(year_to_epoch(2001).unwrap().year_start_ms_modulo_400y, 0);
        assert_eq!(year_to_epoch(2401).unwrap().year_start_ms_modulo_400y, 0);
        assert_eq!(year_to_epoch(1601).unwrap().year_start_ms_modulo_400y, 0);
        assert_eq!(year_to_epoch(1970).unwrap().year_start_ms_modulo_400y, 11_644_473_600_000);
        assert_eq!(
            year_to_epoch(2000).unwrap().year_start_ms_modulo_400y,
            FOUR_HUNDRED_YEARS_MS - LEAP_YEAR_MS
        );
    }

    #[test]
    fn test_leap_cascade_matches_divisibility_rule() {
        for year in -1200..=2800 {
            assert_eq!(
                year_to_epoch_unchecked(year).is_leap_year,
                is_leap_year(year),
                "Year {year} leapness disagrees"
            );
        }
    }

    #[test]
    fn test_consecutive_years_are_contiguous() {
        for year in -1200..=2800 {
            let this = year_to_epoch_unchecked(year);
            let next = year_to_epoch_unchecked(year + 1);
            assert_eq!(
                next.year_start_ms - this.year_start_ms,
                this.year_length_ms(),
                "Year {year} has the wrong length"
            );
        }
    }

    #[test]
    fn test_first_day_weekday() {
        assert_eq!(year_to_epoch(2001).unwrap().first_day_weekday(), 1);
        assert_eq!(year_to_epoch(1970).unwrap().first_day_weekday(), 4);
        assert_eq!(year_to_epoch(2026).unwrap().first_day_weekday(), 4);
        assert_eq!(year_to_epoch(2020).unwrap().first_day_weekday(), 3);
        assert_eq!(year_to_epoch(2021).unwrap().first_day_weekday(), 5);
    }

    #[test]
    fn test_year_bounds() {
        assert!(year_to_epoch(MIN_FULL_YEAR).is_ok());
        assert!(year_to_epoch(MAX_FULL_YEAR).is_ok());

        let err = year_to_epoch(MAX_FULL_YEAR + 1).unwrap_err();
        assert_eq!(err.label, "year");
        assert_eq!(err.value, i64::from(MAX_FULL_YEAR) + 1);
        assert_eq!(err.max, i64::from(MAX_FULL_YEAR));

        assert!(year_to_epoch(MIN_FULL_YEAR - 1).is_err());
    }

    #[test]
    fn test_timestamp_bounds() {
        assert_eq!(MIN_FULL_YEAR, -271_819);
        assert_eq!(MAX_FULL_YEAR, 275_759);
        assert_eq!(MIN_TIMESTAMP, -8_639_946_259_200_000);
        assert_eq!(MAX_TIMESTAMP, 8_639_977_881_599_999);
        // Year-aligned, so the two ends sit at different distances from the epoch.
        assert_ne!(MIN_TIMESTAMP, -MAX_TIMESTAMP);

        assert_eq!(epoch_to_year(MIN_TIMESTAMP).unwrap().year, MIN_FULL_YEAR);
        assert_eq!(epoch_to_year(MAX_TIMESTAMP).unwrap().year, MAX_FULL_YEAR);
        assert!(epoch_to_year(MIN_TIMESTAMP - 1).is_err());
        assert!(epoch_to_year(MAX_TIMESTAMP + 1).is_err());
    }

    #[test]
    fn test_epoch_to_year_around_epoch() {
        let split = epoch_to_year(0).unwrap();
        assert_eq!(split.year, 1970);
        assert_eq!(split.remainder_ms, 0);

        let split = epoch_to_year(-1).unwrap();
        assert_eq!(split.year, 1969);
        assert_eq!(split.remainder_ms, YEAR_MS - 1);
        assert!(!split.is_leap_year);
    }

    #[test]
    fn test_epoch_to_year_last_day_of_cycle() {
        // Dec 31, 2400 is the one day whose century quotient would be 4.
        let start = year_to_epoch(2400).unwrap();
        let split = epoch_to_year(start.year_start_ms + 365 * DAY_MS).unwrap();
        assert_eq!(split.year, 2400);
        assert!(split.is_leap_year);
        assert_eq!(split.remainder_ms, 365 * DAY_MS);

        let split = epoch_to_year(start.year_start_ms + LEAP_YEAR_MS).unwrap();
        assert_eq!(split.year, 2401);
        assert_eq!(split.remainder_ms, 0);
    }

    #[test]
    fn test_epoch_to_year_last_day_of_leap_year() {
        // Dec 31, 2024 is the one day whose year-in-quad quotient would be 4.
        let start = year_to_epoch(2024).unwrap();
        let split = epoch_to_year(start.year_start_ms + LEAP_YEAR_MS - 1).unwrap();
        assert_eq!(split.year, 2024);
        assert_eq!(split.remainder_ms, LEAP_YEAR_MS - 1);
    }

    #[test]
    fn test_round_trip_year_boundaries() {
        for year in (-3000..=3000).chain([MIN_FULL_YEAR, MIN_FULL_YEAR + 1, MAX_FULL_YEAR - 1, MAX_FULL_YEAR]) {
            let start = year_to_epoch(year).unwrap();

            let split = epoch_to_year(start.year_start_ms).unwrap();
            assert_eq!(split.year, year);
            assert_eq!(split.remainder_ms, 0);
            assert_eq!(split.start(), start);

            let split = epoch_to_year_unchecked(start.year_start_ms + start.year_length_ms() - 1);
            assert_eq!(split.year, year, "last millisecond of {year}");
            assert_eq!(split.remainder_ms, start.year_length_ms() - 1);
        }
    }

    #[test]
    fn test_unchecked_out_of_range_inputs_do_not_panic() {
        for year in [i32::MIN, MIN_FULL_YEAR - 1, MAX_FULL_YEAR + 1, i32::MAX] {
            let start = year_to_epoch_unchecked(year);
            assert!((1..=7).contains(&start.first_day_weekday()), "year {year}");
        }
        for ms in [i64::MIN, MIN_TIMESTAMP - 1, MAX_TIMESTAMP + 1, i64::MAX] {
            let split = epoch_to_year_unchecked(ms);
            assert!(split.remainder_ms >= 0, "timestamp {ms}");
        }
    }

    quickcheck::quickcheck! {
        fn prop_split_recomposes(ms: i64) -> bool {
            let ms = ms % -MIN_TIMESTAMP;
            let split = epoch_to_year_unchecked(ms);
            let start = year_to_epoch_unchecked(split.year);
            start.year_start_ms + split.remainder_ms == ms
                && split.start() == start
                && (0..start.year_length_ms()).contains(&split.remainder_ms)
        }
    }
}
