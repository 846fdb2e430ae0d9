//! Bin budget policy: effective bin count and the separator run length.

use crate::core::constants::MIN_REDUCIBLE_POWER_OF_TWO_BINS;
use crate::core::types::FloatValue;

/// Maximum bin count after reserving room for the missing bin.
///
/// With missing values present, a power-of-two budget of at least 16 bins
/// gives one bin up so that missing plus regular bins still fit the same
/// storage width. Smaller budgets and non-powers of two are unchanged.
pub fn effective_max_bins(is_missing: bool, max_bins: usize) -> usize {
    debug_assert!(2 <= max_bins);
    if is_missing && MIN_REDUCIBLE_POWER_OF_TWO_BINS <= max_bins && max_bins.is_power_of_two() {
        max_bins - 1
    } else {
        max_bins
    }
}

/// Minimum length of a run of equal values that separates splitting ranges.
///
/// This is `ceil(n / max_bins)` clamped up to `min_instances_per_bin`, and
/// always satisfies `avg_length * max_bins >= n`, which guarantees every
/// splitting range can hold at least one cut.
pub fn avg_length(num_values: usize, max_bins: usize, min_instances_per_bin: usize) -> usize {
    debug_assert!(2 <= max_bins);
    debug_assert!(1 <= min_instances_per_bin);

    let avg_length_float = (num_values as FloatValue / max_bins as FloatValue).ceil();
    let mut avg_length = avg_length_float as usize;
    // large integers do not round-trip through f64, so step up past the float
    while (avg_length as FloatValue) < avg_length_float {
        avg_length += 1;
    }
    while avg_length.saturating_mul(max_bins) < num_values {
        avg_length += 1;
    }
    avg_length.max(min_instances_per_bin)
}
