use serde::Serialize;

/// A numeric input fell outside its inclusive bounds.
///
/// Carries everything needed to render a diagnostic: what was checked, the
/// offending value and the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[error("{label} {value} is out of range {min}..={max}")]
pub struct RangeError {
    /// Human readable name of the checked quantity.
    pub label: &'static str,
    /// The rejected value.
    pub value: i64,
    /// Smallest accepted value.
    pub min: i64,
    /// Largest accepted value.
    pub max: i64,
}

/// Returns `value` if `min <= value <= max`, otherwise a `RangeError`
/// labelled with `label`.
///
/// # Errors
/// Returns `RangeError` when `value` is outside `min..=max`.
#[inline]
pub fn check_range<T>(label: &'static str, value: T, min: T, max: T) -> Result<T, RangeError>
where
    T: PartialOrd + Copy + Into<i64>,
{
    if value < min || value > max {
        return Err(out_of_range(label, value.into(), min.into(), max.into()));
    }
    Ok(value)
}

#[cold]
const fn out_of_range(label: &'static str, value: i64, min: i64, max: i64) -> RangeError {
    RangeError {
        label,
        value,
        min,
        max,
    }
}
