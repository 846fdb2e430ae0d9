//! Value to bin classification against a sorted cut-point array.

use crate::core::constants::{MISSING_BIN, UNSEEN_MISSING_BIN};
use crate::core::error::{DiscretizerError, Result};
use crate::core::types::{BinId, FloatValue};

/// Bin id of a single value.
///
/// NaN maps to [`MISSING_BIN`] when the feature has a missing bin and to
/// [`UNSEEN_MISSING_BIN`] otherwise. Any other value gets the number of cut
/// points `<= value`, shifted up by one when the missing bin is reserved.
#[inline]
pub fn value_to_bin(is_missing: bool, cut_points: &[FloatValue], value: FloatValue) -> BinId {
    if value.is_nan() {
        return if is_missing {
            MISSING_BIN
        } else {
            UNSEEN_MISSING_BIN
        };
    }
    let bin = cut_points.partition_point(|&cut| cut <= value) as BinId;
    bin + BinId::from(is_missing)
}

/// Bin every value of `values`.
///
/// `cut_points` must be strictly increasing; this is only checked in debug
/// builds.
pub fn discretize(is_missing: bool, cut_points: &[FloatValue], values: &[FloatValue]) -> Vec<BinId> {
    debug_assert!(cut_points.windows(2).all(|w| w[0] < w[1]));
    values
        .iter()
        .map(|&value| value_to_bin(is_missing, cut_points, value))
        .collect()
}

/// Bin every value of `values` into `out` without allocating.
pub fn discretize_into(
    is_missing: bool,
    cut_points: &[FloatValue],
    values: &[FloatValue],
    out: &mut [BinId],
) -> Result<()> {
    if values.len() != out.len() {
        return Err(DiscretizerError::dimension_mismatch(
            format!("{} output slots", values.len()),
            format!("{} output slots", out.len()),
        ));
    }
    debug_assert!(cut_points.windows(2).all(|w| w[0] < w[1]));
    for (slot, &value) in out.iter_mut().zip(values) {
        *slot = value_to_bin(is_missing, cut_points, value);
    }
    Ok(())
}
