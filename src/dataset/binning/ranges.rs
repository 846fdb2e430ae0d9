//! Splitting ranges: the spans of sorted values that may host cut points.
//!
//! The sorted values are viewed as long runs of identical values (at least
//! `avg_length` long, too uniform to cut inside) separated by spans of other
//! values. Each such span is a [`SplittingRange`]. A range may be empty: it
//! then sits exactly between two long runs and its cut separates them.
//!
//! Cuts are addressed by *gap* index: gap `i` lies between sorted positions
//! `i - 1` and `i`, so valid gaps are `1..k` and a gap is usable only when the
//! two values around it differ.

use crate::core::error::{DiscretizerError, Result};
use crate::core::types::{FloatValue, RangePosition};
use crate::core::utils::checked_scratch_bytes;
use std::mem;

/// A candidate region for cut points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplittingRange {
    /// First index of the splittable span in the sorted values
    pub splittable_start: usize,
    /// Number of values in the splittable span; may be zero
    pub splittable_len: usize,
    /// Length of the long run just before the span, 0 at the start of the values
    pub prior_unsplittable_len: usize,
    /// Length of the long run just after the span, 0 at the end of the values
    pub subsequent_unsplittable_len: usize,
    /// Larger of the two flank lengths
    pub flank_max: usize,
    /// Smaller of the two flank lengths
    pub flank_min: usize,
    /// Number of cuts this range will host, at least 1
    pub assigned_splits: usize,
    /// First/last flags
    pub position: RangePosition,
}

impl SplittingRange {
    /// Create a range with one assigned split.
    ///
    /// A range starting at index 0 is flagged [`RangePosition::FIRST`].
    pub fn new(
        splittable_start: usize,
        splittable_len: usize,
        prior_unsplittable_len: usize,
        subsequent_unsplittable_len: usize,
    ) -> Self {
        SplittingRange {
            splittable_start,
            splittable_len,
            prior_unsplittable_len,
            subsequent_unsplittable_len,
            flank_max: prior_unsplittable_len.max(subsequent_unsplittable_len),
            flank_min: prior_unsplittable_len.min(subsequent_unsplittable_len),
            assigned_splits: 1,
            position: if splittable_start == 0 {
                RangePosition::FIRST
            } else {
                RangePosition::MIDDLE
            },
        }
    }

    /// One past the last index of the splittable span.
    pub fn splittable_end(&self) -> usize {
        self.splittable_start + self.splittable_len
    }

    /// Inclusive gap window where this range's cuts may go.
    ///
    /// The window spans from the end of the prior run to the start of the
    /// subsequent run, trimmed so that at least `min_instances_per_bin`
    /// values stay below the first gap and above the last one.
    pub fn cut_window(&self, num_values: usize, min_instances_per_bin: usize) -> (usize, usize) {
        let lo = self.splittable_start.max(min_instances_per_bin).max(1);
        let hi = self
            .splittable_end()
            .min(num_values.saturating_sub(min_instances_per_bin));
        (lo, hi)
    }
}

/// Ranges produced by one scan, in increasing index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplittingRanges {
    /// The ranges, disjoint and ordered by `splittable_start`
    pub ranges: Vec<SplittingRange>,
    /// Sum of `splittable_len` over all ranges
    pub total_splittable: usize,
}

impl SplittingRanges {
    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True when no range can host a cut.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Single left-to-right scan over sorted values yielding splitting ranges.
///
/// A run of at least `avg_length` equal values is a separator and closes the
/// span in front of it. The leading span (starting at index 0) is kept only
/// if it holds at least `min_instances_per_bin` values; otherwise it is
/// folded into the unsplittable run after it. The trailing span after the
/// last separator follows the same rule. When no separator exists at all the
/// whole array is one range, kept only if some gap can be cut with
/// `min_instances_per_bin` values on each side.
#[derive(Debug, Clone)]
pub struct SplittingRangeScan<'a> {
    values: &'a [FloatValue],
    avg_length: usize,
    min_instances_per_bin: usize,
    scan: usize,
    run_start: usize,
    span_start: usize,
    prior_run: usize,
    trailing_done: bool,
}

impl<'a> SplittingRangeScan<'a> {
    /// Start a scan over `values`, which must be sorted ascending and NaN free.
    pub fn new(values: &'a [FloatValue], avg_length: usize, min_instances_per_bin: usize) -> Self {
        debug_assert!(1 <= avg_length);
        debug_assert!(1 <= min_instances_per_bin);
        debug_assert!(values.windows(2).all(|w| w[0] <= w[1]));
        SplittingRangeScan {
            values,
            avg_length,
            min_instances_per_bin,
            scan: 1,
            run_start: 0,
            span_start: 0,
            prior_run: 0,
            trailing_done: false,
        }
    }

    fn trailing_range(&self) -> Option<SplittingRange> {
        let num_values = self.values.len();
        let trailing_len = num_values - self.span_start;
        if trailing_len == 0 {
            return None;
        }
        if self.span_start == 0 {
            // no separator anywhere: one range or nothing
            return has_feasible_cut(self.values, self.min_instances_per_bin)
                .then(|| SplittingRange::new(0, num_values, 0, 0));
        }
        (self.min_instances_per_bin <= trailing_len)
            .then(|| SplittingRange::new(self.span_start, trailing_len, self.prior_run, 0))
    }
}

impl Iterator for SplittingRangeScan<'_> {
    type Item = SplittingRange;

    fn next(&mut self) -> Option<SplittingRange> {
        let num_values = self.values.len();
        while self.scan <= num_values {
            let scan = self.scan;
            self.scan += 1;
            if scan < num_values && self.values[scan] == self.values[self.run_start] {
                continue;
            }

            let run_start = mem::replace(&mut self.run_start, scan);
            let run_len = scan - run_start;
            if run_len < self.avg_length {
                continue;
            }

            let span_start = mem::replace(&mut self.span_start, scan);
            let span_len = run_start - span_start;
            let prior_run = mem::replace(&mut self.prior_run, run_len);
            if span_start != 0 || self.min_instances_per_bin <= span_len {
                return Some(SplittingRange::new(span_start, span_len, prior_run, run_len));
            }
        }

        if self.trailing_done {
            return None;
        }
        self.trailing_done = true;
        self.trailing_range()
    }
}

/// True if some gap has `min_instances_per_bin` values on each side and
/// separates two different values.
pub fn has_feasible_cut(values: &[FloatValue], min_instances_per_bin: usize) -> bool {
    let num_values = values.len();
    if num_values < min_instances_per_bin.saturating_mul(2) {
        return false;
    }
    (min_instances_per_bin.max(1)..=num_values - min_instances_per_bin)
        .any(|gap| values[gap - 1] != values[gap])
}

/// Count the splitting ranges without materializing them.
pub fn count_splitting_ranges(
    values: &[FloatValue],
    avg_length: usize,
    min_instances_per_bin: usize,
) -> usize {
    SplittingRangeScan::new(values, avg_length, min_instances_per_bin).count()
}

/// Build the ordered splitting ranges for sorted, NaN-free `values`.
///
/// Ranges are counted first so the scratch buffer is sized, overflow checked
/// and reserved before any range is written. The last range gains the
/// [`RangePosition::LAST`] flag.
pub fn build_splitting_ranges(
    values: &[FloatValue],
    avg_length: usize,
    min_instances_per_bin: usize,
) -> Result<SplittingRanges> {
    let count = count_splitting_ranges(values, avg_length, min_instances_per_bin);
    if count == 0 {
        return Ok(SplittingRanges::default());
    }

    let record_bytes = mem::size_of::<SplittingRange>() + mem::size_of::<usize>();
    let requested = checked_scratch_bytes("splitting ranges", count, record_bytes)?;

    let mut ranges = Vec::new();
    ranges
        .try_reserve_exact(count)
        .map_err(|_| DiscretizerError::allocation_failure("splitting ranges", requested))?;

    let mut total_splittable = 0;
    for range in SplittingRangeScan::new(values, avg_length, min_instances_per_bin) {
        total_splittable += range.splittable_len;
        ranges.push(range);
    }
    debug_assert_eq!(ranges.len(), count);

    if let Some(last) = ranges.last_mut() {
        last.position.insert(RangePosition::LAST);
    }

    Ok(SplittingRanges {
        ranges,
        total_splittable,
    })
}
