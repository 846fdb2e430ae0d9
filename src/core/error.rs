//! Error handling and error types for the quantile discretizer.
//!
//! Every failure is returned as a value. Nothing in the cut-point pipeline
//! panics across the public boundary; callers get a [`DiscretizerError`] and a
//! warning in the log.

use std::io;
use thiserror::Error;

/// Main error type for the discretizer.
#[derive(Error, Debug)]
pub enum DiscretizerError {
    /// A count does not fit the integer width it has to be stored in
    #[error("Conversion overflow: {what} = {value} does not fit the target integer type")]
    ConversionOverflow { what: String, value: String },

    /// Scratch memory could not be obtained, or its size overflowed
    #[error("Allocation failure: {what} (requested {requested})")]
    AllocationFailure { what: String, requested: String },

    /// The seeded random stream could not be constructed
    #[error("Random source initialization failed for seed {seed}: {reason}")]
    RandomSourceInitFailure { seed: i64, reason: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Cut-point serialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Bincode serialization errors
    #[error("Bincode error: {source}")]
    Bincode {
        #[from]
        source: bincode::Error,
    },

    /// TOML parsing errors
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
}

/// Type alias for Results using DiscretizerError
pub type Result<T> = std::result::Result<T, DiscretizerError>;

impl DiscretizerError {
    /// Create a conversion overflow error
    pub fn conversion_overflow<W, V>(what: W, value: V) -> Self
    where
        W: Into<String>,
        V: ToString,
    {
        DiscretizerError::ConversionOverflow {
            what: what.into(),
            value: value.to_string(),
        }
    }

    /// Create an allocation failure error
    pub fn allocation_failure<W, R>(what: W, requested: R) -> Self
    where
        W: Into<String>,
        R: ToString,
    {
        DiscretizerError::AllocationFailure {
            what: what.into(),
            requested: requested.to_string(),
        }
    }

    /// Create a random source initialization error
    pub fn random_source_init<S: Into<String>>(seed: i64, reason: S) -> Self {
        DiscretizerError::RandomSourceInitFailure {
            seed,
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        DiscretizerError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        DiscretizerError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        DiscretizerError::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        DiscretizerError::Serialization {
            message: message.into(),
        }
    }

    /// Check if retrying the call with the same inputs could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            DiscretizerError::ConversionOverflow { .. } => false,
            DiscretizerError::AllocationFailure { .. } => true,
            DiscretizerError::RandomSourceInitFailure { .. } => true,
            DiscretizerError::InvalidParameter { .. } => false,
            DiscretizerError::DimensionMismatch { .. } => false,
            DiscretizerError::Config { .. } => false,
            DiscretizerError::Serialization { .. } => false,
            DiscretizerError::IO { .. } => true,
            DiscretizerError::Json { .. } => false,
            DiscretizerError::Bincode { .. } => false,
            DiscretizerError::Toml { .. } => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            DiscretizerError::ConversionOverflow { .. } => "conversion_overflow",
            DiscretizerError::AllocationFailure { .. } => "allocation_failure",
            DiscretizerError::RandomSourceInitFailure { .. } => "random_source_init_failure",
            DiscretizerError::InvalidParameter { .. } => "invalid_parameter",
            DiscretizerError::DimensionMismatch { .. } => "dimension_mismatch",
            DiscretizerError::Config { .. } => "config",
            DiscretizerError::Serialization { .. } => "serialization",
            DiscretizerError::IO { .. } => "io",
            DiscretizerError::Json { .. } => "json",
            DiscretizerError::Bincode { .. } => "bincode",
            DiscretizerError::Toml { .. } => "toml",
        }
    }
}

/// Convenience macro for configuration errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::DiscretizerError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::DiscretizerError::config(format!($fmt, $($arg)*))
    };
}

/// Early-return with the given error when the condition does not hold
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DiscretizerError::conversion_overflow("max_bins", -3);
        assert_eq!(err.category(), "conversion_overflow");
        assert!(!err.is_recoverable());

        let err = DiscretizerError::allocation_failure("splitting ranges", 1usize << 40);
        assert_eq!(err.category(), "allocation_failure");
        assert!(err.is_recoverable());

        let err = DiscretizerError::random_source_init(7, "no entropy");
        assert_eq!(err.category(), "random_source_init_failure");
    }

    #[test]
    fn test_error_macros() {
        let err = config_error!("test error");
        assert!(matches!(err, DiscretizerError::Config { .. }));

        let err = config_error!("bad value: {}", 42);
        assert!(err.to_string().contains("bad value: 42"));
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: i64) -> Result<i64> {
            ensure!(
                value >= 0,
                DiscretizerError::invalid_parameter("value", value.to_string(), "must be non-negative")
            );
            Ok(value)
        }

        assert!(check(1).is_ok());
        assert!(matches!(check(-1), Err(DiscretizerError::InvalidParameter { .. })));
    }

    #[test]
    fn test_error_display() {
        let err = DiscretizerError::conversion_overflow("countInstances", "18446744073709551615");
        let error_string = format!("{}", err);
        assert!(error_string.contains("Conversion overflow"));
        assert!(error_string.contains("countInstances"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: DiscretizerError = io_err.into();
        assert!(matches!(err, DiscretizerError::IO { .. }));
        assert_eq!(err.category(), "io");
    }
}
