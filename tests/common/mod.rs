//! Common test utilities for quantile discretizer integration tests.
#![allow(dead_code)]

use ndarray::Array2;
use quantile_discretizer::*;
use rand::prelude::*;

/// Uniform continuous values in `[-100, 100)`
pub fn create_continuous_feature(num_samples: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_samples).map(|_| rng.gen_range(-100.0..100.0)).collect()
}

/// Integer-valued feature with `cardinality` distinct values
pub fn create_discrete_feature(num_samples: usize, cardinality: u32, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_samples)
        .map(|_| f64::from(rng.gen_range(0..cardinality)))
        .collect()
}

/// Feature dominated by a few heavy values plus a continuous tail
pub fn create_skewed_feature(num_samples: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_samples)
        .map(|_| match rng.gen_range(0..10) {
            0..=3 => 0.0,
            4..=5 => 1.0,
            _ => rng.gen_range(2.0..50.0),
        })
        .collect()
}

/// Replace roughly `rate` of the values with NaN
pub fn inject_missing(values: &mut [f64], rate: f64, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for value in values.iter_mut() {
        if rng.gen_bool(rate) {
            *value = f64::NAN;
        }
    }
}

/// Feature matrix mixing continuous, discrete and sparse-missing columns
pub fn create_test_features(num_samples: usize, num_features: usize) -> Array2<f64> {
    let mut features = Array2::zeros((num_samples, num_features));
    for col in 0..num_features {
        let seed = 1000 + col as u64;
        let mut column = match col % 3 {
            0 => create_continuous_feature(num_samples, seed),
            1 => create_discrete_feature(num_samples, 7, seed),
            _ => create_skewed_feature(num_samples, seed),
        };
        if col % 2 == 1 {
            inject_missing(&mut column, 0.1, seed + 1);
        }
        for (row, value) in column.into_iter().enumerate() {
            features[[row, col]] = value;
        }
    }
    features
}

/// Non-missing values of `values`, sorted ascending
pub fn sorted_present(values: &[f64]) -> Vec<f64> {
    let mut present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    present.sort_by(|a, b| a.total_cmp(b));
    present
}

/// Number of non-missing values in each regular bin
pub fn regular_bin_counts(cut_points: &[f64], values: &[f64]) -> Vec<usize> {
    let mut counts = vec![0; cut_points.len() + 1];
    for bin in discretize(false, cut_points, values) {
        if bin >= 0 {
            counts[bin as usize] += 1;
        }
    }
    counts
}

/// Panics unless `cut_points` is strictly increasing
pub fn assert_strictly_increasing(cut_points: &[f64]) {
    for pair in cut_points.windows(2) {
        assert!(
            pair[0] < pair[1],
            "cut points not strictly increasing: {} >= {}",
            pair[0],
            pair[1]
        );
    }
}

/// Run the cut point pipeline on a copy of `values`
pub fn cut_points_for(
    seed: IntValue,
    values: &[f64],
    max_bins: IntValue,
    min_instances_per_bin: IntValue,
) -> QuantileCuts {
    let mut scratch = values.to_vec();
    generate_quantile_cut_points(seed, &mut scratch, max_bins, min_instances_per_bin)
        .expect("cut point generation failed")
}
