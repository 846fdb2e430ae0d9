//! Feature preprocessing and binning.
//!
//! [`preprocessing`] removes missing values from a feature buffer, and
//! [`binning`] turns the remaining values into cut points and bin ids.

pub mod binning;
pub mod preprocessing;

// Re-export commonly used types
pub use binning::{
    discretize, discretize_into, generate_quantile_cut_points, BinningStatistics,
    CutPointMapper, FeatureBinningStats, FeatureDiscretizer, QuantileCuts,
};
pub use preprocessing::{filter_missing, remove_missing_values, MissingSummary};
