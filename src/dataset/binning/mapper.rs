//! Cut point mapper for feature discretization.
//!
//! A [`CutPointMapper`] owns the validated cut points of one feature and maps
//! values to bin ids. It is the persisted form of a fitted feature: mappers
//! can be written to and read back from bincode or JSON.

use super::discretizer::{discretize_into, value_to_bin};
use super::quantile::{generate_quantile_cut_points, QuantileCuts};
use crate::core::constants::MISSING_BIN;
use crate::core::error::{DiscretizerError, Result};
use crate::core::types::{BinId, FloatValue, IntValue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Bin mapper backed by a strictly increasing cut point array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPointMapper {
    /// Strictly increasing bin boundaries
    cut_points: Vec<FloatValue>,
    /// Whether bin 0 is reserved for missing values
    is_missing: bool,
    /// Minimum non-missing value seen while fitting
    min_value: FloatValue,
    /// Maximum non-missing value seen while fitting
    max_value: FloatValue,
}

impl CutPointMapper {
    /// Create a mapper from explicit cut points.
    pub fn new(
        cut_points: Vec<FloatValue>,
        is_missing: bool,
        min_value: FloatValue,
        max_value: FloatValue,
    ) -> Result<Self> {
        let mapper = CutPointMapper {
            cut_points,
            is_missing,
            min_value,
            max_value,
        };
        mapper.validate()?;
        Ok(mapper)
    }

    /// Create a mapper from the output of the cut point pipeline.
    pub fn from_cuts(cuts: QuantileCuts) -> Result<Self> {
        CutPointMapper::new(cuts.cut_points, cuts.is_missing, cuts.min_value, cuts.max_value)
    }

    /// Fit a mapper on `values`, leaving the caller's slice untouched.
    pub fn fit(
        values: &[FloatValue],
        seed: IntValue,
        max_bins: IntValue,
        min_instances_per_bin: IntValue,
    ) -> Result<Self> {
        let mut scratch = Vec::new();
        scratch.try_reserve_exact(values.len()).map_err(|_| {
            DiscretizerError::allocation_failure("feature copy", format!("{} values", values.len()))
        })?;
        scratch.extend_from_slice(values);

        let cuts = generate_quantile_cut_points(seed, &mut scratch, max_bins, min_instances_per_bin)?;
        CutPointMapper::from_cuts(cuts)
    }

    /// Map a feature value to its bin id
    #[inline]
    pub fn value_to_bin(&self, value: FloatValue) -> BinId {
        value_to_bin(self.is_missing, &self.cut_points, value)
    }

    /// Map every value of `values` into `out`
    pub fn transform_into(&self, values: &[FloatValue], out: &mut [BinId]) -> Result<()> {
        discretize_into(self.is_missing, &self.cut_points, values, out)
    }

    /// Exclusive upper bound of the values mapped to `bin`.
    ///
    /// The last regular bin is unbounded (`+inf`). The missing bin and ids
    /// outside the mapper's range have no bound.
    pub fn bin_upper_bound(&self, bin: BinId) -> Option<FloatValue> {
        if self.is_missing && bin == MISSING_BIN {
            return None;
        }
        let index = bin - BinId::from(self.is_missing);
        let index = usize::try_from(index).ok()?;
        match index.cmp(&self.cut_points.len()) {
            std::cmp::Ordering::Less => Some(self.cut_points[index]),
            std::cmp::Ordering::Equal => Some(FloatValue::INFINITY),
            std::cmp::Ordering::Greater => None,
        }
    }

    /// Number of bin ids this mapper can produce, missing bin included
    pub fn num_bins(&self) -> usize {
        self.cut_points.len() + 1 + usize::from(self.is_missing)
    }

    /// Get the bin boundaries
    pub fn cut_points(&self) -> &[FloatValue] {
        &self.cut_points
    }

    /// Check if bin 0 is the missing bin
    pub fn is_missing(&self) -> bool {
        self.is_missing
    }

    /// Minimum value seen while fitting
    pub fn min_value(&self) -> FloatValue {
        self.min_value
    }

    /// Maximum value seen while fitting
    pub fn max_value(&self) -> FloatValue {
        self.max_value
    }

    /// Get memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.cut_points.len() * std::mem::size_of::<FloatValue>() + std::mem::size_of::<Self>()
    }

    /// Validate the mapper
    pub fn validate(&self) -> Result<()> {
        if self.cut_points.iter().any(|cut| cut.is_nan()) {
            return Err(DiscretizerError::invalid_parameter(
                "cut_points",
                format!("{:?}", self.cut_points),
                "must not contain NaN",
            ));
        }

        if let Some(index) = self.cut_points.windows(2).position(|w| w[0] >= w[1]) {
            return Err(DiscretizerError::invalid_parameter(
                "cut_points",
                format!("{} >= {}", self.cut_points[index], self.cut_points[index + 1]),
                "must be strictly increasing",
            ));
        }

        if self.min_value > self.max_value {
            return Err(DiscretizerError::invalid_parameter(
                "min_value",
                self.min_value.to_string(),
                format!("exceeds max_value {}", self.max_value),
            ));
        }

        Ok(())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON and validate
    pub fn from_json(json: &str) -> Result<Self> {
        let mapper: CutPointMapper = serde_json::from_str(json)?;
        mapper.validate()?;
        Ok(mapper)
    }

    /// Save the mapper in bincode format
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = bincode::serialize(self).map_err(|e| {
            DiscretizerError::serialization(format!("Failed to serialize cut point mapper: {}", e))
        })?;
        fs::write(path, serialized)?;
        Ok(())
    }

    /// Load a mapper saved with [`CutPointMapper::save`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        let mapper: CutPointMapper = bincode::deserialize(&data).map_err(|e| {
            DiscretizerError::serialization(format!("Failed to deserialize cut point mapper: {}", e))
        })?;
        mapper.validate()?;
        Ok(mapper)
    }
}

impl TryFrom<QuantileCuts> for CutPointMapper {
    type Error = DiscretizerError;

    fn try_from(cuts: QuantileCuts) -> Result<Self> {
        CutPointMapper::from_cuts(cuts)
    }
}
