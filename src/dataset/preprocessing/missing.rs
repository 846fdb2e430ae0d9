//! Missing value filtering.
//!
//! Compacts the non-NaN values of a feature to the front of its buffer,
//! keeping their original order, without allocating.

use crate::core::types::FloatValue;

/// Moves every non-NaN value to the leading positions of `values`.
///
/// Returns `k`, the number of non-NaN values. Their relative order is
/// preserved; entries at positions `>= k` are unspecified afterwards. The
/// scan stops early, without writing, if no NaN is present.
pub fn remove_missing_values(values: &mut [FloatValue]) -> usize {
    let first_missing = match values.iter().position(|v| v.is_nan()) {
        Some(index) => index,
        None => return values.len(),
    };

    let mut write = first_missing;
    for read in (first_missing + 1)..values.len() {
        let value = values[read];
        if !value.is_nan() {
            values[write] = value;
            write += 1;
        }
    }
    write
}

/// Result of splitting a feature buffer into present and missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingSummary {
    /// Number of non-missing values now at the front of the buffer
    pub num_present: usize,
    /// Number of NaN values that were removed
    pub num_missing: usize,
}

impl MissingSummary {
    /// True if at least one value was NaN.
    pub fn is_missing(&self) -> bool {
        self.num_missing > 0
    }
}

/// Filter `values` in place and report how many were missing.
pub fn filter_missing(values: &mut [FloatValue]) -> MissingSummary {
    let num_present = remove_missing_values(values);
    MissingSummary {
        num_present,
        num_missing: values.len() - num_present,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_missing_values() {
        let mut values = vec![3.0, 1.0, 2.0];
        assert_eq!(remove_missing_values(&mut values), 3);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_preserves_relative_order() {
        let mut values = vec![f64::NAN, 5.0, f64::NAN, -1.0, 2.0, f64::NAN, 7.0];
        let k = remove_missing_values(&mut values);
        assert_eq!(k, 4);
        assert_eq!(&values[..k], &[5.0, -1.0, 2.0, 7.0]);
    }

    #[test]
    fn test_all_missing() {
        let mut values = vec![f64::NAN; 4];
        assert_eq!(remove_missing_values(&mut values), 0);
    }

    #[test]
    fn test_empty_slice() {
        let mut values: Vec<f64> = Vec::new();
        assert_eq!(remove_missing_values(&mut values), 0);
    }

    #[test]
    fn test_trailing_missing() {
        let mut values = vec![1.0, 2.0, f64::NAN];
        assert_eq!(remove_missing_values(&mut values), 2);
        assert_eq!(&values[..2], &[1.0, 2.0]);
    }

    #[test]
    fn test_filter_missing_summary() {
        let mut values = vec![1.0, f64::NAN, 2.0];
        let summary = filter_missing(&mut values);
        assert_eq!(summary.num_present, 2);
        assert_eq!(summary.num_missing, 1);
        assert!(summary.is_missing());

        let mut clean = vec![1.0, 2.0];
        assert!(!filter_missing(&mut clean).is_missing());
    }

    #[test]
    fn test_infinities_are_not_missing() {
        let mut values = vec![f64::INFINITY, f64::NAN, f64::NEG_INFINITY];
        let k = remove_missing_values(&mut values);
        assert_eq!(k, 2);
        assert_eq!(values[0], f64::INFINITY);
        assert_eq!(values[1], f64::NEG_INFINITY);
    }
}
