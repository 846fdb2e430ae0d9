//! Reproducible orderings of splitting ranges.
//!
//! Both orderings rearrange an index view into the range slice; the ranges
//! themselves never move. After the deterministic sort, every maximal run of
//! entries with equal primary keys is shuffled with draws from the seeded
//! stream, visiting runs in order. A run of `r` entries consumes `r - 1`
//! draws, so the same seed always yields the same final order.

use super::ranges::SplittingRange;
use crate::core::error::{DiscretizerError, Result};
use crate::core::utils::RandomStream;
use std::cmp::Ordering;

/// Identity index view over `num_ranges` ranges.
pub fn index_view(num_ranges: usize) -> Result<Vec<usize>> {
    let mut order = Vec::new();
    order.try_reserve_exact(num_ranges).map_err(|_| {
        DiscretizerError::allocation_failure("range index view", format!("{} indices", num_ranges))
    })?;
    order.extend(0..num_ranges);
    Ok(order)
}

/// Shuffle each run of entries for which `tied` holds against the run's first entry.
fn shuffle_tied_runs<S, F>(stream: &mut S, order: &mut [usize], tied: F)
where
    S: RandomStream + ?Sized,
    F: Fn(usize, usize) -> bool,
{
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && tied(order[start], order[end]) {
            end += 1;
        }

        let mut remaining = end - start;
        let mut index = start;
        while remaining != 1 {
            let pick = index + stream.next(remaining);
            order.swap(index, pick);
            index += 1;
            remaining -= 1;
        }
        start = end;
    }
}

/// Order by ascending `splittable_len`, position breaking ties before the shuffle.
pub fn sort_by_growing_splittable_size<S>(
    stream: &mut S,
    ranges: &[SplittingRange],
    order: &mut [usize],
) where
    S: RandomStream + ?Sized,
{
    order.sort_unstable_by(|&a, &b| {
        let (ra, rb) = (&ranges[a], &ranges[b]);
        ra.splittable_len
            .cmp(&rb.splittable_len)
            .then(ra.splittable_start.cmp(&rb.splittable_start))
    });
    shuffle_tied_runs(stream, order, |a, b| {
        ranges[a].splittable_len == ranges[b].splittable_len
    });
}

fn shrinking_neighbor_key(range: &SplittingRange) -> (usize, usize) {
    (range.flank_max, range.flank_min)
}

/// Order by descending `flank_max`, then descending `flank_min`.
///
/// Ranges squeezed between the longest unsplittable runs come first; ranges
/// at the edges of the values, with a zero flank, sink toward the tail.
pub fn sort_by_shrinking_unsplittable_neighbor<S>(
    stream: &mut S,
    ranges: &[SplittingRange],
    order: &mut [usize],
) where
    S: RandomStream + ?Sized,
{
    order.sort_unstable_by(|&a, &b| {
        let (ra, rb) = (&ranges[a], &ranges[b]);
        match shrinking_neighbor_key(rb).cmp(&shrinking_neighbor_key(ra)) {
            Ordering::Equal => rb.splittable_start.cmp(&ra.splittable_start),
            other => other,
        }
    });
    shuffle_tied_runs(stream, order, |a, b| {
        shrinking_neighbor_key(&ranges[a]) == shrinking_neighbor_key(&ranges[b])
    });
}
