//! Preprocessing applied to a feature before cut points are searched.

pub mod missing;

pub use missing::{filter_missing, remove_missing_values, MissingSummary};
