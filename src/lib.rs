//! # Quantile Discretizer
//!
//! Quantile-based discretization of continuous features for histogram-style
//! learners. Raw feature values (possibly containing NaN) are turned into a
//! short, strictly increasing list of cut points that respects a maximum bin
//! budget and a minimum number of samples per bin, and arbitrary values are
//! then classified into bins by binary search.
//!
//! ## Quick Start
//!
//! ```rust
//! use quantile_discretizer::{discretize, generate_quantile_cut_points};
//!
//! # fn main() -> quantile_discretizer::Result<()> {
//! let mut values = vec![1.0, 2.0, f64::NAN, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0];
//! let cuts = generate_quantile_cut_points(42, &mut values, 4, 2)?;
//! assert!(cuts.is_missing);
//! assert_eq!(cuts.cut_points, vec![1.5]);
//!
//! let bins = discretize(cuts.is_missing, &cuts.cut_points, &[f64::NAN, 1.0, 2.0]);
//! assert_eq!(bins, vec![0, 1, 2]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Whole feature matrices
//!
//! ```rust
//! use quantile_discretizer::{BinningConfigBuilder, FeatureDiscretizer};
//! use ndarray::Array2;
//!
//! # fn main() -> quantile_discretizer::Result<()> {
//! let features = Array2::from_shape_fn((100, 3), |(row, col)| (row * (col + 1)) as f64);
//! let config = BinningConfigBuilder::new().max_bins(16).build()?;
//!
//! let mut discretizer = FeatureDiscretizer::new(config)?;
//! let binned = discretizer.fit_transform(&features)?;
//! assert_eq!(binned.dim(), (100, 3));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: numeric types, constants, error handling and the seeded random stream
//! - [`config`]: binning configuration, validation and file formats
//! - [`dataset`]: missing value filtering, cut point discovery and discretization
//!
//! Determinism: the same seed and the same multiset of input values always
//! produce the same cut points, on every platform.

#![doc(html_root_url = "https://docs.rs/quantile-discretizer/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Feature preprocessing and binning module
pub mod dataset;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{DiscretizerError, Result},
    init_logging,
    types::*,
    utils::{Random, RandomStream, SeedableStream},
};

// Re-export configuration functionality
pub use config::{BinningConfig, BinningConfigBuilder, ConfigValidator, ValidationResult};

// Re-export dataset functionality
pub use dataset::{
    binning::{
        discretize, discretize_into, generate_quantile_cut_points,
        generate_quantile_cut_points_with, BinningStatistics, CutPointMapper,
        FeatureBinningStats, FeatureDiscretizer, QuantileCuts, SplittingRange,
    },
    preprocessing::remove_missing_values,
};

// Version information
pub use crate::core::constants::QUANTILE_DISCRETIZER_VERSION as VERSION;

static_assertions::assert_impl_all!(CutPointMapper: Send, Sync);
static_assertions::assert_impl_all!(FeatureDiscretizer: Send, Sync);
static_assertions::assert_impl_all!(QuantileCuts: Send, Sync);
static_assertions::assert_impl_all!(Random: Send, Sync, Clone);
static_assertions::assert_impl_all!(DiscretizerError: Send, Sync, std::error::Error);
