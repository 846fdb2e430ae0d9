//! Constants and configuration defaults for the quantile discretizer.

use crate::core::types::*;

/// Default maximum number of bins per feature.
pub const DEFAULT_MAX_BINS: IntValue = 256;

/// Default minimum number of samples on each side of a cut.
pub const DEFAULT_MIN_INSTANCES_PER_BIN: IntValue = 1;

/// Default seed for the tie-breaking random stream.
pub const DEFAULT_RANDOM_SEED: IntValue = 42;

/// Smallest power-of-two bin budget that gives one bin up to the missing bin.
///
/// Budgets of 8 or fewer bins keep the extra bit instead.
pub const MIN_REDUCIBLE_POWER_OF_TWO_BINS: usize = 16;

/// Bin id assigned to NaN when the feature has a missing bin.
pub const MISSING_BIN: BinId = 0;

/// Bin id assigned to NaN when the feature was fitted without missing values.
pub const UNSEEN_MISSING_BIN: BinId = -1;

/// Crate version.
pub const QUANTILE_DISCRETIZER_VERSION: &str = env!("CARGO_PKG_VERSION");
