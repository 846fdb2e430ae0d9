//! Quantile cut-point generation for one feature.
//!
//! The pipeline filters NaN, sorts the remaining values, finds the splitting
//! ranges between long runs of identical values, orders them twice with the
//! seeded stream and finally allocates the cut budget over them.

use super::allocator::CutBudgetAllocator;
use super::discretizer::discretize;
use super::ordering::{
    index_view, sort_by_growing_splittable_size, sort_by_shrinking_unsplittable_neighbor,
};
use super::policy::{avg_length, effective_max_bins};
use super::ranges::build_splitting_ranges;
use crate::core::error::{DiscretizerError, Result};
use crate::core::types::{BinId, FloatValue, IntValue};
use crate::core::utils::{to_int_value, to_usize, Random, SeedableStream};
use crate::dataset::preprocessing::filter_missing;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Cut points found for one feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuantileCuts {
    /// Strictly increasing boundary values
    pub cut_points: Vec<FloatValue>,
    /// True if any input value was NaN
    pub is_missing: bool,
    /// Smallest non-missing value, 0 when there is none
    pub min_value: FloatValue,
    /// Largest non-missing value, 0 when there is none
    pub max_value: FloatValue,
}

impl QuantileCuts {
    /// Number of cut points.
    pub fn num_cuts(&self) -> usize {
        self.cut_points.len()
    }

    /// Number of distinct bin ids produced by [`QuantileCuts::discretize`],
    /// counting the missing bin when present.
    pub fn num_bins(&self) -> usize {
        self.cut_points.len() + 1 + usize::from(self.is_missing)
    }

    /// Bin every value against these cut points.
    pub fn discretize(&self, values: &[FloatValue]) -> Vec<BinId> {
        discretize(self.is_missing, &self.cut_points, values)
    }
}

/// Generate quantile cut points with the default [`Random`] stream.
///
/// `values` is filtered and sorted in place; its contents are unspecified
/// afterwards. Negative `max_bins` or `min_instances_per_bin` fail with
/// [`DiscretizerError::ConversionOverflow`].
///
/// # Examples
///
/// ```rust
/// use quantile_discretizer::dataset::binning::generate_quantile_cut_points;
///
/// let mut values = vec![1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0];
/// let cuts = generate_quantile_cut_points(42, &mut values, 4, 2).unwrap();
/// assert_eq!(cuts.cut_points, vec![1.5]);
/// assert_eq!(cuts.min_value, 1.0);
/// assert_eq!(cuts.max_value, 2.0);
/// ```
pub fn generate_quantile_cut_points(
    seed: IntValue,
    values: &mut [FloatValue],
    max_bins: IntValue,
    min_instances_per_bin: IntValue,
) -> Result<QuantileCuts> {
    generate_quantile_cut_points_with::<Random>(seed, values, max_bins, min_instances_per_bin)
}

/// Generate quantile cut points, drawing tie-breaks from a stream of type `S`.
pub fn generate_quantile_cut_points_with<S: SeedableStream>(
    seed: IntValue,
    values: &mut [FloatValue],
    max_bins: IntValue,
    min_instances_per_bin: IntValue,
) -> Result<QuantileCuts> {
    info!(
        "Generating quantile cut points: {} values, max_bins={}, min_instances_per_bin={}, seed={}",
        values.len(),
        max_bins,
        min_instances_per_bin,
        seed
    );

    let result = find_cut_points::<S>(seed, values, max_bins, min_instances_per_bin);
    match &result {
        Ok(cuts) => info!(
            "Generated {} cut points (missing: {}, range: [{}, {}])",
            cuts.cut_points.len(),
            cuts.is_missing,
            cuts.min_value,
            cuts.max_value
        ),
        Err(err) => warn!(
            "Quantile cut point generation failed [{}]: {}",
            err.category(),
            err
        ),
    }
    result
}

fn find_cut_points<S: SeedableStream>(
    seed: IntValue,
    values: &mut [FloatValue],
    max_bins: IntValue,
    min_instances_per_bin: IntValue,
) -> Result<QuantileCuts> {
    let max_bins = to_usize("maxBins", max_bins)?;
    let min_instances_per_bin = to_usize("minInstancesPerBin", min_instances_per_bin)?;
    to_int_value("countInstances", values.len())?;

    if values.is_empty() {
        debug!("No values, no cut points");
        return Ok(QuantileCuts::default());
    }

    let summary = filter_missing(values);
    let is_missing = summary.is_missing();
    let present = &mut values[..summary.num_present];
    if present.is_empty() {
        debug!("All {} values are missing, no cut points", summary.num_missing);
        return Ok(QuantileCuts {
            is_missing,
            ..QuantileCuts::default()
        });
    }

    present.sort_unstable_by(|a, b| a.total_cmp(b));
    let mut cuts = QuantileCuts {
        cut_points: Vec::new(),
        is_missing,
        min_value: present[0],
        max_value: present[present.len() - 1],
    };

    if max_bins <= 1 {
        debug!("max_bins={} leaves no room for a cut", max_bins);
        return Ok(cuts);
    }

    let min_instances_per_bin = min_instances_per_bin.max(1);
    if present.len() < min_instances_per_bin.saturating_mul(2) {
        debug!(
            "{} values cannot fill two bins of {} instances",
            present.len(),
            min_instances_per_bin
        );
        return Ok(cuts);
    }

    let effective_max_bins = effective_max_bins(is_missing, max_bins);
    let avg_length = avg_length(present.len(), effective_max_bins, min_instances_per_bin);
    let present: &[FloatValue] = present;

    let mut splitting = build_splitting_ranges(present, avg_length, min_instances_per_bin)?;
    if splitting.is_empty() {
        debug!("No splitting range can host a cut");
        return Ok(cuts);
    }
    debug!(
        "Found {} splitting ranges covering {} values (avg_length={}, effective_max_bins={})",
        splitting.len(),
        splitting.total_splittable,
        avg_length,
        effective_max_bins
    );

    let mut stream = S::from_seed(seed).map_err(|err| match err {
        DiscretizerError::RandomSourceInitFailure { .. } => err,
        other => DiscretizerError::random_source_init(seed, other.to_string()),
    })?;

    let mut growing = index_view(splitting.len())?;
    let mut shrinking = index_view(splitting.len())?;
    sort_by_growing_splittable_size(&mut stream, &splitting.ranges, &mut growing);
    sort_by_shrinking_unsplittable_neighbor(&mut stream, &splitting.ranges, &mut shrinking);

    let allocator =
        CutBudgetAllocator::new(present, avg_length, min_instances_per_bin, effective_max_bins - 1);
    cuts.cut_points = allocator.allocate(&mut splitting.ranges, &growing, &shrinking)?;
    Ok(cuts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::RandomStream;

    struct FailingStream;

    impl RandomStream for FailingStream {
        fn next(&mut self, _bound: usize) -> usize {
            0
        }
    }

    impl SeedableStream for FailingStream {
        fn from_seed(seed: IntValue) -> Result<Self> {
            Err(DiscretizerError::random_source_init(seed, "entropy unavailable"))
        }
    }

    #[test]
    fn test_empty_input() {
        let mut values: Vec<f64> = Vec::new();
        let cuts = generate_quantile_cut_points(1, &mut values, 256, 1).unwrap();
        assert_eq!(cuts, QuantileCuts::default());
        assert_eq!(cuts.num_bins(), 1);
    }

    #[test]
    fn test_all_missing() {
        let mut values = vec![f64::NAN; 5];
        let cuts = generate_quantile_cut_points(1, &mut values, 256, 1).unwrap();
        assert!(cuts.cut_points.is_empty());
        assert!(cuts.is_missing);
        assert_eq!(cuts.min_value, 0.0);
        assert_eq!(cuts.max_value, 0.0);
    }

    #[test]
    fn test_single_value() {
        let mut values = vec![3.5];
        let cuts = generate_quantile_cut_points(1, &mut values, 256, 1).unwrap();
        assert!(cuts.cut_points.is_empty());
        assert_eq!(cuts.min_value, 3.5);
        assert_eq!(cuts.max_value, 3.5);
    }

    #[test]
    fn test_max_bins_one_gives_no_cuts() {
        let mut values: Vec<f64> = (0..100).map(f64::from).collect();
        let cuts = generate_quantile_cut_points(1, &mut values, 1, 1).unwrap();
        assert!(cuts.cut_points.is_empty());
        assert_eq!(cuts.min_value, 0.0);
        assert_eq!(cuts.max_value, 99.0);
    }

    #[test]
    fn test_two_runs_scenario() {
        let mut values = vec![2.0, 1.0, 2.0, 1.0, 1.0, 2.0, 1.0, 2.0, 2.0, 1.0];
        let cuts = generate_quantile_cut_points(7, &mut values, 4, 2).unwrap();
        assert!(!cuts.is_missing);
        assert_eq!(cuts.min_value, 1.0);
        assert_eq!(cuts.max_value, 2.0);
        assert!(cuts.cut_points.iter().any(|&c| 1.0 < c && c < 2.0));
    }

    #[test]
    fn test_negative_parameters_overflow() {
        let mut values = vec![1.0, 2.0];
        let err = generate_quantile_cut_points(1, &mut values, -1, 1).unwrap_err();
        assert!(matches!(err, DiscretizerError::ConversionOverflow { .. }));

        let err = generate_quantile_cut_points(1, &mut values, 4, -2).unwrap_err();
        assert!(matches!(err, DiscretizerError::ConversionOverflow { .. }));
    }

    #[test]
    fn test_stream_failure_is_reported() {
        let mut values: Vec<f64> = (0..20).map(f64::from).collect();
        let err =
            generate_quantile_cut_points_with::<FailingStream>(3, &mut values, 4, 1).unwrap_err();
        assert!(matches!(
            err,
            DiscretizerError::RandomSourceInitFailure { seed: 3, .. }
        ));
    }

    #[test]
    fn test_stream_not_needed_for_degenerate_input() {
        let mut values = vec![1.0; 10];
        let cuts = generate_quantile_cut_points_with::<FailingStream>(3, &mut values, 4, 1).unwrap();
        assert!(cuts.cut_points.is_empty());
    }

    #[test]
    fn test_cut_count_within_budget() {
        let mut values: Vec<f64> = (0..1000).map(|i| f64::from(i % 97)).collect();
        let cuts = generate_quantile_cut_points(11, &mut values, 16, 1).unwrap();
        assert!(!cuts.cut_points.is_empty());
        assert!(cuts.cut_points.len() <= 15);
        assert!(cuts.cut_points.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_reserves_a_bin() {
        let mut values: Vec<f64> = (0..1000).map(f64::from).collect();
        values[10] = f64::NAN;
        let cuts = generate_quantile_cut_points(11, &mut values, 16, 1).unwrap();
        assert!(cuts.is_missing);
        assert!(cuts.cut_points.len() <= 14);
        assert!(cuts.num_bins() <= 16);
    }
}
