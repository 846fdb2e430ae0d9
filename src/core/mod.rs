//! Core infrastructure for the quantile discretizer.
//!
//! - [`types`]: the boundary float and integer types and range position flags
//! - [`constants`]: configuration defaults and reserved bin ids
//! - [`error`]: the error enum and `Result` alias
//! - [`utils`]: checked conversions and the seeded random stream
//!
//! ```rust
//! use quantile_discretizer::core::{
//!     constants::DEFAULT_MAX_BINS,
//!     error::{DiscretizerError, Result},
//!     types::{FloatValue, IntValue},
//!     utils::{Random, RandomStream},
//! };
//!
//! let mut stream = Random::with_seed(DEFAULT_MAX_BINS);
//! assert!(stream.next(10) < 10);
//! ```

pub mod constants;
pub mod error;
pub mod types;
pub mod utils;

pub use constants::*;
pub use error::{DiscretizerError, Result};
pub use types::*;

/// Install `env_logger` as the `log` backend.
///
/// Defaults to the `info` filter when `RUST_LOG` is unset. Calling it more
/// than once is harmless; later calls are ignored.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).is_test(cfg!(test)).try_init();
}
