//! Core data types for the quantile discretizer.
//!
//! One floating-point type and one integer type cross the public boundary:
//! every value, cut point, count and bin id is expressed with them. Internal
//! bookkeeping uses `usize` and converts through checked helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Feature value and cut point type.
pub type FloatValue = f64;

/// Count, bin id and seed type used at the public boundary.
pub type IntValue = i64;

/// Bin id produced by the discretizer.
pub type BinId = IntValue;

/// Feature index type for identifying columns of a feature matrix.
pub type FeatureIndex = usize;

/// Where a splitting range sits in the sequence of ranges.
///
/// A range can be both first and last when it is the only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RangePosition(u8);

impl RangePosition {
    /// Neither first nor last.
    pub const MIDDLE: RangePosition = RangePosition(0x0);
    /// The range starts at the beginning of the sorted values.
    pub const FIRST: RangePosition = RangePosition(0x1);
    /// The last range produced by the scan.
    pub const LAST: RangePosition = RangePosition(0x2);

    /// Returns true if every flag in `other` is set in `self`.
    pub fn contains(self, other: RangePosition) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets every flag present in `other`.
    pub fn insert(&mut self, other: RangePosition) {
        self.0 |= other.0;
    }

    /// True when neither the first nor the last flag is set.
    pub fn is_middle(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for RangePosition {
    type Output = RangePosition;

    fn bitor(self, rhs: RangePosition) -> RangePosition {
        RangePosition(self.0 | rhs.0)
    }
}

impl fmt::Display for RangePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.contains(Self::FIRST), self.contains(Self::LAST)) {
            (true, true) => write!(f, "first|last"),
            (true, false) => write!(f, "first"),
            (false, true) => write!(f, "last"),
            (false, false) => write!(f, "middle"),
        }
    }
}
