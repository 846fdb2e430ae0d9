//! Binning configuration structure and builder.

use crate::config::validation::{ConfigValidator, ValidationResult};
use crate::core::constants::*;
use crate::core::error::{DiscretizerError, Result};
use crate::core::types::IntValue;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for fitting cut points on a set of features
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinningConfig {
    /// Maximum number of bins per feature, missing bin included
    pub max_bins: IntValue,
    /// Minimum number of samples on each side of a cut; 0 behaves like 1
    pub min_instances_per_bin: IntValue,
    /// Seed of the tie-breaking stream; feature `i` uses `random_seed + i`
    pub random_seed: IntValue,
    /// Fit features on the rayon thread pool
    pub parallel: bool,
}

impl Default for BinningConfig {
    fn default() -> Self {
        BinningConfig {
            max_bins: DEFAULT_MAX_BINS,
            min_instances_per_bin: DEFAULT_MIN_INSTANCES_PER_BIN,
            random_seed: DEFAULT_RANDOM_SEED,
            parallel: true,
        }
    }
}

impl BinningConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration, failing on the first error.
    ///
    /// Warnings are logged and do not fail validation.
    pub fn validate(&self) -> Result<()> {
        for result in ConfigValidator::new().validate(self) {
            match result {
                ValidationResult::Valid => {}
                ValidationResult::Warning(warning) => log::warn!("{}", warning),
                ValidationResult::Error(error) => return Err(error.into()),
            }
        }
        Ok(())
    }

    /// Seed used for the feature at `feature_index`
    pub fn feature_seed(&self, feature_index: usize) -> IntValue {
        self.random_seed
            .wrapping_add(IntValue::try_from(feature_index).unwrap_or(IntValue::MAX))
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BinningConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| DiscretizerError::config(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Load configuration from a `.toml` or `.json` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DiscretizerError::config(format!("Failed to read config file: {}", e)))?;

        let config: BinningConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| DiscretizerError::config(format!("Failed to parse JSON config: {}", e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| DiscretizerError::config(format!("Failed to parse TOML config: {}", e)))?,
            _ => {
                return Err(DiscretizerError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.toml` or `.json` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| DiscretizerError::config(format!("Failed to serialize to JSON: {}", e)))?,
            Some("toml") => self.to_toml_string()?,
            _ => {
                return Err(DiscretizerError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| DiscretizerError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

/// Builder for [`BinningConfig`]
#[derive(Debug, Clone, Default)]
pub struct BinningConfigBuilder {
    config: BinningConfig,
    validation_errors: Vec<String>,
}

impl BinningConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        BinningConfigBuilder {
            config: BinningConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the maximum number of bins
    pub fn max_bins(mut self, max_bins: IntValue) -> Self {
        if max_bins < 0 {
            self.validation_errors
                .push("max_bins must be non-negative".to_string());
        }
        self.config.max_bins = max_bins;
        self
    }

    /// Set the minimum number of samples per bin
    pub fn min_instances_per_bin(mut self, min_instances: IntValue) -> Self {
        if min_instances < 0 {
            self.validation_errors
                .push("min_instances_per_bin must be non-negative".to_string());
        }
        self.config.min_instances_per_bin = min_instances;
        self
    }

    /// Set the random seed
    pub fn random_seed(mut self, seed: IntValue) -> Self {
        self.config.random_seed = seed;
        self
    }

    /// Enable or disable parallel fitting
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BinningConfig> {
        if !self.validation_errors.is_empty() {
            return Err(DiscretizerError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BinningConfig::default();
        assert_eq!(config.max_bins, 256);
        assert_eq!(config.min_instances_per_bin, 1);
        assert_eq!(config.random_seed, 42);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = BinningConfigBuilder::new()
            .max_bins(16)
            .min_instances_per_bin(3)
            .random_seed(7)
            .parallel(false)
            .build()
            .unwrap();
        assert_eq!(config.max_bins, 16);
        assert_eq!(config.min_instances_per_bin, 3);
        assert_eq!(config.random_seed, 7);
        assert!(!config.parallel);
    }

    #[test]
    fn test_builder_rejects_negative_values() {
        assert!(BinningConfigBuilder::new().max_bins(-1).build().is_err());
        assert!(BinningConfigBuilder::new()
            .min_instances_per_bin(-5)
            .build()
            .is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = BinningConfigBuilder::new().max_bins(64).build().unwrap();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("max_bins = 64"));
        assert_eq!(BinningConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = BinningConfig::from_toml_str("max_bins = 8").unwrap();
        assert_eq!(config.max_bins, 8);
        assert_eq!(config.random_seed, DEFAULT_RANDOM_SEED);
    }

    #[test]
    fn test_invalid_toml_values() {
        assert!(BinningConfig::from_toml_str("max_bins = -3").is_err());
        assert!(matches!(
            BinningConfig::from_toml_str("max_bins = \"many\""),
            Err(DiscretizerError::Toml { .. })
        ));
    }

    #[test]
    fn test_feature_seed() {
        let config = BinningConfig::default();
        assert_eq!(config.feature_seed(0), 42);
        assert_eq!(config.feature_seed(3), 45);

        let config = BinningConfigBuilder::new()
            .random_seed(IntValue::MAX)
            .build()
            .unwrap();
        assert_eq!(config.feature_seed(1), IntValue::MIN);
    }
}
