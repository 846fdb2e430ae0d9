//! Configuration management for the quantile discretizer.
//!
//! [`BinningConfig`] carries the per-feature binning parameters. It can be
//! built in code, parsed from TOML, or loaded from `.toml`/`.json` files, and
//! is validated by [`ConfigValidator`] before use.

pub mod core;
pub mod validation;

pub use self::core::{BinningConfig, BinningConfigBuilder};
pub use validation::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "discretizer.toml";
