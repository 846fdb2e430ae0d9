//! Feature binning: quantile cut point discovery and discretization.
//!
//! The per-feature pipeline lives in [`quantile`], built from the leaves up:
//!
//! - [`policy`]: effective bin budget and separator run length
//! - [`ranges`]: splitting ranges between long runs of equal values
//! - [`ordering`]: the two reproducible orderings of those ranges
//! - [`allocator`]: cut budget distribution and boundary values
//! - [`discretizer`]: value to bin classification
//!
//! [`CutPointMapper`] packages one fitted feature, and [`FeatureDiscretizer`]
//! fits and applies mappers for every column of a feature matrix.

pub mod allocator;
pub mod discretizer;
pub mod mapper;
pub mod ordering;
pub mod policy;
pub mod quantile;
pub mod ranges;

// Re-export commonly used types
pub use allocator::{boundary_value, CutBudgetAllocator};
pub use discretizer::{discretize, discretize_into, value_to_bin};
pub use mapper::CutPointMapper;
pub use ordering::{sort_by_growing_splittable_size, sort_by_shrinking_unsplittable_neighbor};
pub use policy::{avg_length, effective_max_bins};
pub use quantile::{generate_quantile_cut_points, generate_quantile_cut_points_with, QuantileCuts};
pub use ranges::{build_splitting_ranges, SplittingRange, SplittingRanges};

use crate::config::BinningConfig;
use crate::core::error::{DiscretizerError, Result};
use crate::core::types::*;
use log::info;
use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Fits and applies one [`CutPointMapper`] per feature column
#[derive(Debug, Clone)]
pub struct FeatureDiscretizer {
    /// Binning configuration
    config: BinningConfig,
    /// Cut point mappers, one per fitted feature
    mappers: Vec<CutPointMapper>,
    /// Number of NaN values seen per feature while fitting
    missing_counts: Vec<usize>,
    /// Duration of the last fit in milliseconds
    fit_time_ms: u64,
}

/// Binning statistics for analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinningStatistics {
    /// Number of features fitted
    pub num_features: usize,
    /// Average number of bins per feature
    pub avg_bins_per_feature: f64,
    /// Memory usage of the mappers in bytes
    pub memory_usage: usize,
    /// Duration of the fit in milliseconds
    pub processing_time_ms: u64,
    /// Per-feature statistics
    pub feature_stats: Vec<FeatureBinningStats>,
}

/// Binning statistics for an individual feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBinningStats {
    /// Feature index
    pub feature_index: FeatureIndex,
    /// Number of bins, missing bin included
    pub num_bins: usize,
    /// Number of cut points
    pub num_cuts: usize,
    /// Number of NaN values seen while fitting
    pub missing_count: usize,
    /// Whether bin 0 is reserved for missing values
    pub is_missing: bool,
    /// Minimum non-missing value
    pub min_value: FloatValue,
    /// Maximum non-missing value
    pub max_value: FloatValue,
}

impl FeatureDiscretizer {
    /// Create a new feature discretizer
    pub fn new(config: BinningConfig) -> Result<Self> {
        config.validate()?;
        Ok(FeatureDiscretizer {
            config,
            mappers: Vec::new(),
            missing_counts: Vec::new(),
            fit_time_ms: 0,
        })
    }

    /// Fit cut points for every column of `features`.
    ///
    /// Feature `i` is fitted with seed `random_seed + i`, so parallel and
    /// sequential fits produce identical mappers.
    pub fn fit(&mut self, features: &Array2<FloatValue>) -> Result<()> {
        let num_features = features.ncols();
        info!(
            "Fitting cut points for {} features over {} samples (parallel: {})",
            num_features,
            features.nrows(),
            self.config.parallel
        );
        let start = Instant::now();

        let config = &self.config;
        let fit_feature = |feature_index: FeatureIndex| -> Result<(CutPointMapper, usize)> {
            fit_column(config, feature_index, features.column(feature_index))
        };
        let fitted: Result<Vec<_>> = if config.parallel {
            (0..num_features).into_par_iter().map(fit_feature).collect()
        } else {
            (0..num_features).map(fit_feature).collect()
        };

        let (mappers, missing_counts) = fitted?.into_iter().unzip();
        self.mappers = mappers;
        self.missing_counts = missing_counts;
        self.fit_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            "Fitted {} features in {} ms",
            self.mappers.len(),
            self.fit_time_ms
        );
        Ok(())
    }

    /// Transform features to bin ids
    pub fn transform(&self, features: &Array2<FloatValue>) -> Result<Array2<BinId>> {
        if features.ncols() != self.mappers.len() {
            return Err(DiscretizerError::dimension_mismatch(
                format!("fitted features: {}", self.mappers.len()),
                format!("input features: {}", features.ncols()),
            ));
        }

        let mut binned = Array2::zeros((features.nrows(), features.ncols()));
        if self.config.parallel {
            binned
                .axis_iter_mut(Axis(1))
                .into_par_iter()
                .zip(features.axis_iter(Axis(1)).into_par_iter())
                .zip(self.mappers.par_iter())
                .for_each(|((out, column), mapper)| bin_column(mapper, column, out));
        } else {
            binned
                .axis_iter_mut(Axis(1))
                .zip(features.axis_iter(Axis(1)))
                .zip(self.mappers.iter())
                .for_each(|((out, column), mapper)| bin_column(mapper, column, out));
        }
        Ok(binned)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, features: &Array2<FloatValue>) -> Result<Array2<BinId>> {
        self.fit(features)?;
        self.transform(features)
    }

    /// Get the binning configuration
    pub fn config(&self) -> &BinningConfig {
        &self.config
    }

    /// Get cut point mappers
    pub fn mappers(&self) -> &[CutPointMapper] {
        &self.mappers
    }

    /// Get the mapper for a specific feature
    pub fn mapper(&self, feature_index: FeatureIndex) -> Option<&CutPointMapper> {
        self.mappers.get(feature_index)
    }

    /// Number of fitted features
    pub fn num_features(&self) -> usize {
        self.mappers.len()
    }

    /// Get binning statistics
    pub fn statistics(&self) -> BinningStatistics {
        let num_features = self.mappers.len();
        let avg_bins_per_feature = if num_features > 0 {
            self.mappers.iter().map(|m| m.num_bins()).sum::<usize>() as f64 / num_features as f64
        } else {
            0.0
        };

        let feature_stats = self
            .mappers
            .iter()
            .zip(&self.missing_counts)
            .enumerate()
            .map(|(feature_index, (mapper, &missing_count))| FeatureBinningStats {
                feature_index,
                num_bins: mapper.num_bins(),
                num_cuts: mapper.cut_points().len(),
                missing_count,
                is_missing: mapper.is_missing(),
                min_value: mapper.min_value(),
                max_value: mapper.max_value(),
            })
            .collect();

        BinningStatistics {
            num_features,
            avg_bins_per_feature,
            memory_usage: self.mappers.iter().map(|m| m.memory_usage()).sum(),
            processing_time_ms: self.fit_time_ms,
            feature_stats,
        }
    }

    /// Save configuration and mappers in bincode format
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let data = DiscretizerData {
            config: self.config.clone(),
            mappers: self.mappers.clone(),
            missing_counts: self.missing_counts.clone(),
        };

        let serialized = bincode::serialize(&data).map_err(|e| {
            DiscretizerError::serialization(format!("Failed to serialize discretizer: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Load a discretizer saved with [`FeatureDiscretizer::save`]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        let data: DiscretizerData = bincode::deserialize(&data).map_err(|e| {
            DiscretizerError::serialization(format!("Failed to deserialize discretizer: {}", e))
        })?;

        data.config.validate()?;
        for mapper in &data.mappers {
            mapper.validate()?;
        }
        if data.missing_counts.len() != data.mappers.len() {
            return Err(DiscretizerError::dimension_mismatch(
                format!("mappers: {}", data.mappers.len()),
                format!("missing counts: {}", data.missing_counts.len()),
            ));
        }

        Ok(FeatureDiscretizer {
            config: data.config,
            mappers: data.mappers,
            missing_counts: data.missing_counts,
            fit_time_ms: 0,
        })
    }
}

/// Serializable discretizer state
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DiscretizerData {
    config: BinningConfig,
    mappers: Vec<CutPointMapper>,
    missing_counts: Vec<usize>,
}

fn fit_column(
    config: &BinningConfig,
    feature_index: FeatureIndex,
    column: ArrayView1<'_, FloatValue>,
) -> Result<(CutPointMapper, usize)> {
    let mut values = Vec::new();
    values.try_reserve_exact(column.len()).map_err(|_| {
        DiscretizerError::allocation_failure("feature column", format!("{} values", column.len()))
    })?;
    values.extend(column.iter().copied());
    let missing_count = values.iter().filter(|v| v.is_nan()).count();

    let cuts = generate_quantile_cut_points(
        config.feature_seed(feature_index),
        &mut values,
        config.max_bins,
        config.min_instances_per_bin,
    )?;
    Ok((CutPointMapper::from_cuts(cuts)?, missing_count))
}

fn bin_column(
    mapper: &CutPointMapper,
    column: ArrayView1<'_, FloatValue>,
    mut out: ArrayViewMut1<'_, BinId>,
) {
    for (slot, &value) in out.iter_mut().zip(column.iter()) {
        *slot = mapper.value_to_bin(value);
    }
}
