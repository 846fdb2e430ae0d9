//! Checked conversions between the boundary integer type and `usize`.

use crate::core::error::{DiscretizerError, Result};
use crate::core::types::IntValue;

/// Convert a boundary count to `usize`, failing on negative or oversized values.
pub fn to_usize(what: &str, value: IntValue) -> Result<usize> {
    usize::try_from(value).map_err(|_| DiscretizerError::conversion_overflow(what, value))
}

/// Convert an internal count back to the boundary integer type.
pub fn to_int_value(what: &str, value: usize) -> Result<IntValue> {
    IntValue::try_from(value).map_err(|_| DiscretizerError::conversion_overflow(what, value))
}

/// Total bytes needed for `count` records of `record_bytes` each.
///
/// Checked before any scratch allocation is attempted. A product that does
/// not fit `usize` is a conversion overflow, not an allocation failure.
pub fn checked_scratch_bytes(what: &str, count: usize, record_bytes: usize) -> Result<usize> {
    count.checked_mul(record_bytes).ok_or_else(|| {
        DiscretizerError::conversion_overflow(what, format!("{} x {} bytes", count, record_bytes))
    })
}
