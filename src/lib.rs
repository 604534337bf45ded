//! Proleptic Gregorian calendar arithmetic on millisecond timestamps.
//!
//! The engines ([`year`], [`month`], [`week`], [`time`]) convert between
//! offsets and calendar components one level at a time. Each conversion comes
//! as a checked function returning [`RangeError`] and an `_unchecked` twin for
//! callers that have already validated their inputs. [`decode`] and
//! [`encode`] compose them to move between a [`Timestamp`] and a
//! [`DateRecord`].
//!
//! ```
//! use calendar_codec::{DateRecord, Timestamp, decode, encode};
//!
//! let record = DateRecord::new().with_year(2024).with_month(2).with_month_day(29);
//! let timestamp = encode(&record).unwrap();
//! assert_eq!(timestamp, Timestamp::new(1_709_164_800_000).unwrap());
//!
//! let mut decoded = decode(timestamp);
//! assert_eq!(decoded.ordinal_day(), Some(60));
//! ```

mod codec;
mod config;
mod consts;
pub mod month;
mod prelude;
mod range;
mod record;
pub mod time;
mod types;
pub mod week;
pub mod year;

pub use codec::{decode, decode_in_offset, encode, encode_with};
pub use config::{Coherence, EncodeConfig, MissingTime};
pub use consts::*;
pub use range::{RangeError, check_range};
pub use record::DateRecord;
pub use time::TimeOfDay;
pub use types::{Derived, Field, Meridiem, Timestamp, is_leap_year};
pub use week::IsoWeekDate;
pub use year::{YearSplit, YearStart};

/// Why a [`DateRecord`] could not be turned into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// A component, or the resulting timestamp, is outside its range.
    #[error(transparent)]
    OutOfRange(#[from] RangeError),
    /// Two components describe different dates or hours.
    #[error("invalid {component}: {message}")]
    InvalidComponent {
        /// The component that contradicts the ones resolved before it.
        component: Field,
        /// Every component involved in the contradiction, in [`Field`] order.
        positions: Vec<Field>,
        message: String,
    },
    /// The components present do not determine a timestamp.
    #[error("insufficient components: {message}")]
    InvalidComponents { missing: Vec<Field>, message: String },
}
