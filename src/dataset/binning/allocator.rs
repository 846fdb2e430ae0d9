//! Cut budget allocation and boundary placement.
//!
//! Given the ordered splitting ranges, the allocator decides how many cuts
//! each range hosts and turns them into literal boundary values:
//!
//! 1. Ranges beyond the budget are dropped from the tail of the
//!    shrinking-neighbor order; a dropped range keeps `assigned_splits == 0`.
//! 2. Every kept range gets one cut. Spare budget goes round-robin to the
//!    largest ranges first, up to their share `len / avg_length`, and then to
//!    any range with room left, until the budget or the room runs out.
//! 3. Each range first cuts next to the long runs that flank it, so every
//!    such run ends up in a bin of its own, then spreads its other cuts
//!    evenly over its own values. Consecutive cuts keep at least
//!    `min_instances_per_bin` values between them.
//!
//! A cut at gap `i` lies between sorted positions `i - 1` and `i`, which must
//! hold different values. Its boundary `b` satisfies `v[i-1] < b <= v[i]`.

use super::ranges::SplittingRange;
use crate::core::error::{DiscretizerError, Result};
use crate::core::types::FloatValue;
use log::debug;

/// Boundary value strictly above `low` and at most `high`.
///
/// The midpoint is used when it can be represented strictly between the two;
/// otherwise (adjacent floats, infinite inputs) the result is `high`.
pub fn boundary_value(low: FloatValue, high: FloatValue) -> FloatValue {
    debug_assert!(low < high);
    let mut mid = low + (high - low) * 0.5;
    if !mid.is_finite() {
        mid = low * 0.5 + high * 0.5;
    }
    if low < mid && mid <= high {
        mid
    } else {
        high
    }
}

/// Distributes a cut budget over splitting ranges of one sorted feature.
#[derive(Debug, Clone, Copy)]
pub struct CutBudgetAllocator<'a> {
    values: &'a [FloatValue],
    avg_length: usize,
    min_instances_per_bin: usize,
    budget: usize,
}

impl<'a> CutBudgetAllocator<'a> {
    /// Create an allocator for sorted, NaN-free `values` and a total of `budget` cuts.
    pub fn new(
        values: &'a [FloatValue],
        avg_length: usize,
        min_instances_per_bin: usize,
        budget: usize,
    ) -> Self {
        CutBudgetAllocator {
            values,
            avg_length: avg_length.max(1),
            min_instances_per_bin: min_instances_per_bin.max(1),
            budget,
        }
    }

    fn is_cut_gap(&self, gap: usize) -> bool {
        0 < gap && gap < self.values.len() && self.values[gap - 1] != self.values[gap]
    }

    fn window(&self, range: &SplittingRange) -> (usize, usize) {
        range.cut_window(self.values.len(), self.min_instances_per_bin)
    }

    /// Most cuts `range` can host with the minimum spacing.
    pub fn capacity(&self, range: &SplittingRange) -> usize {
        let (lo, hi) = self.window(range);
        let mut count = 0;
        let mut next_allowed = lo;
        for gap in lo..=hi {
            if next_allowed <= gap && self.is_cut_gap(gap) {
                count += 1;
                next_allowed = gap + self.min_instances_per_bin;
            }
        }
        count
    }

    /// Keep at most `budget` ranges, preferring the head of `shrinking_order`.
    ///
    /// Dropped ranges, and ranges that cannot host any cut, get zero
    /// assigned splits. Returns the number of ranges kept.
    pub fn cap_ranges(&self, ranges: &mut [SplittingRange], shrinking_order: &[usize]) -> usize {
        let mut kept = 0;
        for &index in shrinking_order {
            let range = &mut ranges[index];
            if kept < self.budget && self.capacity(range) > 0 {
                range.assigned_splits = 1;
                kept += 1;
            } else {
                range.assigned_splits = 0;
            }
        }
        if kept < shrinking_order.len() {
            debug!(
                "Dropped {} of {} splitting ranges to fit a budget of {} cuts",
                shrinking_order.len() - kept,
                shrinking_order.len(),
                self.budget
            );
        }
        kept
    }

    /// Hand out budget left after one cut per kept range.
    ///
    /// Ranges are visited largest first (reverse of `growing_order`). Returns
    /// the unused budget, which is nonzero only when every range is full.
    pub fn distribute(
        &self,
        ranges: &mut [SplittingRange],
        growing_order: &[usize],
        capacities: &[usize],
    ) -> usize {
        let kept: usize = ranges.iter().map(|r| r.assigned_splits).sum();
        debug_assert!(kept <= self.budget);
        let mut remaining = self.budget.saturating_sub(kept);

        let avg_length = self.avg_length;
        let share = |range: &SplittingRange, capacity: usize| {
            (range.splittable_len / avg_length).max(1).min(capacity)
        };
        remaining = self.round_robin(ranges, growing_order, remaining, |range, index| {
            share(range, capacities[index])
        });
        remaining = self.round_robin(ranges, growing_order, remaining, |_, index| {
            capacities[index]
        });
        remaining
    }

    fn round_robin<F>(
        &self,
        ranges: &mut [SplittingRange],
        growing_order: &[usize],
        mut remaining: usize,
        limit: F,
    ) -> usize
    where
        F: Fn(&SplittingRange, usize) -> usize,
    {
        while remaining > 0 {
            let mut progressed = false;
            for &index in growing_order.iter().rev() {
                if remaining == 0 {
                    break;
                }
                let range = &mut ranges[index];
                if range.assigned_splits == 0 {
                    continue;
                }
                if range.assigned_splits < limit(range, index) {
                    range.assigned_splits += 1;
                    remaining -= 1;
                    progressed = true;
                }
            }
            if !progressed {
                break;
            }
        }
        remaining
    }

    /// Gaps for the `range.assigned_splits` cuts inside its window.
    ///
    /// A window end that borders a long run is cut first, as far as the cut
    /// count allows; with a single cut and runs on both sides, the cut goes
    /// next to the longer run. The `f` remaining cuts split the range's own
    /// values evenly: free cut `i` aims at `start + len * i / (f + 1)`. Each
    /// cut takes the cut gap nearest its target that still leaves room for
    /// the cuts after it.
    pub fn place(&self, range: &SplittingRange) -> Vec<usize> {
        let count = range.assigned_splits;
        if count == 0 {
            return Vec::new();
        }
        let (lo, hi) = self.window(range);
        let spacing = self.min_instances_per_bin;

        let mut earliest = Vec::with_capacity(count);
        let mut next_allowed = lo;
        for gap in lo..=hi {
            if earliest.len() == count {
                break;
            }
            if next_allowed <= gap && self.is_cut_gap(gap) {
                earliest.push(gap);
                next_allowed = gap + spacing;
            }
        }
        debug_assert_eq!(earliest.len(), count, "range assigned beyond capacity");
        if earliest.is_empty() {
            return Vec::new();
        }

        let mut latest = vec![0; earliest.len()];
        let mut slot = latest.len();
        let mut prev_allowed = hi;
        for gap in (lo..=hi).rev() {
            if slot == 0 {
                break;
            }
            if gap <= prev_allowed && self.is_cut_gap(gap) {
                slot -= 1;
                latest[slot] = gap;
                prev_allowed = gap.saturating_sub(spacing);
            }
        }

        let targets = self.targets(range, lo, hi, earliest.len());
        let mut gaps = Vec::with_capacity(earliest.len());
        for (j, &target) in targets.iter().enumerate() {
            let low = match gaps.last() {
                Some(&prev) => earliest[j].max(prev + spacing),
                None => earliest[j],
            };
            gaps.push(self.nearest_cut_gap(target, low, latest[j]));
        }
        gaps
    }

    /// Target gap of each of the `count` cuts of `range`, ascending.
    fn targets(&self, range: &SplittingRange, lo: usize, hi: usize, count: usize) -> Vec<usize> {
        let mut pin_lo = range.prior_unsplittable_len > 0
            && lo == range.splittable_start
            && self.is_cut_gap(lo);
        let mut pin_hi = range.subsequent_unsplittable_len > 0
            && hi == range.splittable_end()
            && self.is_cut_gap(hi);
        if count == 1 && pin_lo && pin_hi {
            if range.prior_unsplittable_len >= range.subsequent_unsplittable_len {
                pin_hi = false;
            } else {
                pin_lo = false;
            }
        }

        let free = count - usize::from(pin_lo) - usize::from(pin_hi);
        let start = range.splittable_start;
        let len = range.splittable_len as u128;
        let parts = free as u128 + 1;

        let mut targets = Vec::with_capacity(count);
        if pin_lo {
            targets.push(lo);
        }
        targets.extend((1..=free).map(|i| start + (len * i as u128 / parts) as usize));
        if pin_hi {
            targets.push(hi);
        }
        targets
    }

    /// Cut gap in `[low, high]` closest to `target`, the lower one on a tie.
    fn nearest_cut_gap(&self, target: usize, low: usize, high: usize) -> usize {
        debug_assert!(low <= high);
        let center = target.clamp(low, high);
        for distance in 0..=(high - low) {
            if let Some(gap) = center.checked_sub(distance) {
                if low <= gap && self.is_cut_gap(gap) {
                    return gap;
                }
            }
            let gap = center + distance;
            if gap <= high && self.is_cut_gap(gap) {
                return gap;
            }
        }
        // `high` came from right packing and is always a cut gap
        high
    }

    /// Run the allocation and return the merged, strictly increasing cut points.
    ///
    /// `ranges` must be in index order; the two orders are index views over it.
    pub fn allocate(
        &self,
        ranges: &mut [SplittingRange],
        growing_order: &[usize],
        shrinking_order: &[usize],
    ) -> Result<Vec<FloatValue>> {
        if self.budget == 0 || ranges.is_empty() {
            return Ok(Vec::new());
        }

        self.cap_ranges(ranges, shrinking_order);
        let capacities: Vec<usize> = ranges.iter().map(|range| self.capacity(range)).collect();
        let unused = self.distribute(ranges, growing_order, &capacities);

        let total: usize = ranges.iter().map(|r| r.assigned_splits).sum();
        debug!(
            "Assigned {} cuts over {} ranges ({} of the budget unused)",
            total,
            ranges.iter().filter(|r| r.assigned_splits > 0).count(),
            unused
        );

        let mut cut_points = Vec::new();
        cut_points
            .try_reserve_exact(total)
            .map_err(|_| DiscretizerError::allocation_failure("cut points", format!("{} values", total)))?;
        for range in ranges.iter() {
            for gap in self.place(range) {
                cut_points.push(boundary_value(self.values[gap - 1], self.values[gap]));
            }
        }
        debug_assert!(cut_points.windows(2).all(|w| w[0] < w[1]));
        Ok(cut_points)
    }
}
