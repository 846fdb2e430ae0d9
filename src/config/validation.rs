//! Configuration validation for the binning parameters.
//!
//! Validation yields one result per checked parameter. Errors make a
//! configuration unusable; warnings flag settings that work but are unlikely
//! to be intended.

use crate::config::core::BinningConfig;
use crate::core::error::DiscretizerError;
use crate::core::types::IntValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bin budgets above this are accepted but reported.
pub const LARGE_MAX_BINS_WARNING: IntValue = 1 << 16;

/// Validation result enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationResult {
    /// Parameter is valid
    Valid,
    /// Parameter has a warning (non-fatal)
    Warning(ValidationWarning),
    /// Parameter has an error (fatal)
    Error(ValidationError),
}

impl ValidationResult {
    /// True for [`ValidationResult::Error`]
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationResult::Error(_))
    }
}

/// Validation warning structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Parameter name
    pub parameter: String,
    /// Parameter value
    pub value: String,
    /// Warning message
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parameter '{}' = '{}': {}",
            self.parameter, self.value, self.message
        )
    }
}

/// Validation error structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Parameter name
    pub parameter: String,
    /// Parameter value
    pub value: String,
    /// Error message
    pub message: String,
    /// Valid range or options
    pub valid_range: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parameter '{}' = '{}': {}",
            self.parameter, self.value, self.message
        )?;
        if let Some(ref range) = self.valid_range {
            write!(f, " (valid range: {})", range)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for DiscretizerError {
    fn from(error: ValidationError) -> Self {
        let reason = match error.valid_range {
            Some(range) => format!("{} (valid range: {})", error.message, range),
            None => error.message,
        };
        DiscretizerError::invalid_parameter(error.parameter, error.value, reason)
    }
}

/// Configuration validator
#[derive(Debug, Clone, Default)]
pub struct ConfigValidator {
    /// Report warnings as errors
    strict_mode: bool,
}

impl ConfigValidator {
    /// Create a new configuration validator
    pub fn new() -> Self {
        ConfigValidator { strict_mode: false }
    }

    /// Create a validator that turns warnings into errors
    pub fn strict() -> Self {
        ConfigValidator { strict_mode: true }
    }

    /// Validate configuration
    pub fn validate(&self, config: &BinningConfig) -> Vec<ValidationResult> {
        let results = vec![
            self.validate_max_bins(config.max_bins),
            self.validate_min_instances(config.min_instances_per_bin),
        ];
        if !self.strict_mode {
            return results;
        }
        results
            .into_iter()
            .map(|result| match result {
                ValidationResult::Warning(warning) => ValidationResult::Error(ValidationError {
                    parameter: warning.parameter,
                    value: warning.value,
                    message: warning.message,
                    valid_range: None,
                }),
                other => other,
            })
            .collect()
    }

    fn validate_max_bins(&self, max_bins: IntValue) -> ValidationResult {
        if max_bins < 0 || usize::try_from(max_bins).is_err() {
            return ValidationResult::Error(ValidationError {
                parameter: "max_bins".to_string(),
                value: max_bins.to_string(),
                message: "Must be a non-negative count".to_string(),
                valid_range: Some("0 or more".to_string()),
            });
        }
        if max_bins <= 1 {
            return ValidationResult::Warning(ValidationWarning {
                parameter: "max_bins".to_string(),
                value: max_bins.to_string(),
                message: "No cut points can be produced with fewer than 2 bins".to_string(),
            });
        }
        if max_bins > LARGE_MAX_BINS_WARNING {
            return ValidationResult::Warning(ValidationWarning {
                parameter: "max_bins".to_string(),
                value: max_bins.to_string(),
                message: format!("Bin budget above {} is unusually large", LARGE_MAX_BINS_WARNING),
            });
        }
        ValidationResult::Valid
    }

    fn validate_min_instances(&self, min_instances: IntValue) -> ValidationResult {
        if min_instances < 0 || usize::try_from(min_instances).is_err() {
            return ValidationResult::Error(ValidationError {
                parameter: "min_instances_per_bin".to_string(),
                value: min_instances.to_string(),
                message: "Must be a non-negative count".to_string(),
                valid_range: Some("0 or more".to_string()),
            });
        }
        if min_instances == 0 {
            return ValidationResult::Warning(ValidationWarning {
                parameter: "min_instances_per_bin".to_string(),
                value: "0".to_string(),
                message: "Treated as 1".to_string(),
            });
        }
        ValidationResult::Valid
    }
}
