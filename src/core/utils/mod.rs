//! Utility modules shared by the binning pipeline.

pub mod convert;
pub mod random;

pub use convert::{checked_scratch_bytes, to_int_value, to_usize};
pub use random::{Random, RandomStream, SeedableStream};
