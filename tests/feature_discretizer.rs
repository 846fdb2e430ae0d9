//! Integration tests for multi-feature discretization.

mod common;

use common::*;
use ndarray::{Array2, Axis};
use quantile_discretizer::*;

fn config(max_bins: IntValue, min_instances: IntValue, parallel: bool) -> BinningConfig {
    BinningConfigBuilder::new()
        .max_bins(max_bins)
        .min_instances_per_bin(min_instances)
        .random_seed(2024)
        .parallel(parallel)
        .build()
        .unwrap()
}

#[test]
fn test_fit_transform_shapes_and_ranges() {
    init_logging();
    let features = create_test_features(800, 6);
    let mut discretizer = FeatureDiscretizer::new(config(32, 5, true)).unwrap();
    let binned = discretizer.fit_transform(&features).unwrap();

    assert_eq!(binned.dim(), features.dim());
    assert_eq!(discretizer.num_features(), 6);

    for (feature_index, column) in binned.axis_iter(Axis(1)).enumerate() {
        let mapper = discretizer.mapper(feature_index).unwrap();
        let max_bin = mapper.num_bins() as BinId - 1;
        assert!(column.iter().all(|&b| (0..=max_bin).contains(&b)));
        assert!(mapper.num_bins() <= 32);
    }
}

#[test]
fn test_each_column_matches_single_feature_pipeline() {
    let features = create_test_features(500, 4);
    let cfg = config(16, 3, true);
    let mut discretizer = FeatureDiscretizer::new(cfg.clone()).unwrap();
    discretizer.fit(&features).unwrap();

    for (feature_index, column) in features.axis_iter(Axis(1)).enumerate() {
        let values = column.to_vec();
        let expected = cut_points_for(
            cfg.feature_seed(feature_index),
            &values,
            cfg.max_bins,
            cfg.min_instances_per_bin,
        );
        let mapper = discretizer.mapper(feature_index).unwrap();
        assert_eq!(mapper.cut_points(), &expected.cut_points[..]);
        assert_eq!(mapper.is_missing(), expected.is_missing);
    }
}

#[test]
fn test_parallel_and_sequential_agree() {
    let features = create_test_features(1200, 9);
    let mut parallel = FeatureDiscretizer::new(config(64, 2, true)).unwrap();
    let mut sequential = FeatureDiscretizer::new(config(64, 2, false)).unwrap();

    let a = parallel.fit_transform(&features).unwrap();
    let b = sequential.fit_transform(&features).unwrap();
    assert_eq!(a, b);
    assert_eq!(parallel.mappers(), sequential.mappers());
}

#[test]
fn test_missing_columns_use_bin_zero() {
    let features = create_test_features(400, 4);
    let mut discretizer = FeatureDiscretizer::new(config(16, 1, true)).unwrap();
    let binned = discretizer.fit_transform(&features).unwrap();

    // odd columns carry injected NaN
    for feature_index in [1, 3] {
        assert!(discretizer.mapper(feature_index).unwrap().is_missing());
        for (row, value) in features.column(feature_index).iter().enumerate() {
            if value.is_nan() {
                assert_eq!(binned[[row, feature_index]], MISSING_BIN);
            } else {
                assert!(binned[[row, feature_index]] >= 1);
            }
        }
    }
}

#[test]
fn test_unseen_missing_in_transform() {
    let train = Array2::from_shape_fn((50, 1), |(row, _)| row as f64);
    let mut discretizer = FeatureDiscretizer::new(config(8, 1, false)).unwrap();
    discretizer.fit(&train).unwrap();
    assert!(!discretizer.mapper(0).unwrap().is_missing());

    let test = Array2::from_shape_vec((2, 1), vec![f64::NAN, 10.0]).unwrap();
    let binned = discretizer.transform(&test).unwrap();
    assert_eq!(binned[[0, 0]], UNSEEN_MISSING_BIN);
    assert!(binned[[1, 0]] >= 0);
}

#[test]
fn test_statistics_report() {
    let features = create_test_features(600, 3);
    let mut discretizer = FeatureDiscretizer::new(config(16, 1, true)).unwrap();
    discretizer.fit(&features).unwrap();

    let stats = discretizer.statistics();
    assert_eq!(stats.num_features, 3);
    for (feature_index, feature_stats) in stats.feature_stats.iter().enumerate() {
        let column = features.column(feature_index);
        let missing = column.iter().filter(|v| v.is_nan()).count();
        assert_eq!(feature_stats.feature_index, feature_index);
        assert_eq!(feature_stats.missing_count, missing);
        assert_eq!(feature_stats.is_missing, missing > 0);
        assert_eq!(feature_stats.num_bins, feature_stats.num_cuts + 1 + usize::from(missing > 0));
        assert!(feature_stats.min_value <= feature_stats.max_value);
    }
}

#[test]
fn test_empty_matrix() {
    let features = Array2::<f64>::zeros((0, 2));
    let mut discretizer = FeatureDiscretizer::new(BinningConfig::default()).unwrap();
    let binned = discretizer.fit_transform(&features).unwrap();
    assert_eq!(binned.dim(), (0, 2));
    assert!(discretizer.mappers().iter().all(|m| m.cut_points().is_empty()));
}
