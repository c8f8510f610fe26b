//! Configuration validation errors.
//!
//! Values are carried as `f64` so that every integer and float parameter of
//! the motor configuration converts losslessly into the error.

use crate::common::ErrorSeverity;

/// Errors produced while validating a motor configuration.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Value outside its accepted range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// The rejected value
        value: f64,
        /// Minimum accepted value
        min: f64,
        /// Maximum accepted value
        max: f64,
    },

    /// Value is NaN or infinite
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Field name
        field: &'static str,
    },

    /// PWM ceiling left at its conservative default of zero
    #[error("PWM limit is not configured; set max_pwm before driving the motor")]
    PwmLimitUnset,
}

impl ConfigError {
    /// Get the error severity.
    ///
    /// An unset PWM ceiling is critical: a controller built from it would
    /// never energize the motor and the failure would only show up as a
    /// silent lack of motion.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConfigError::PwmLimitUnset => ErrorSeverity::Critical,
            ConfigError::OutOfRange { .. } | ConfigError::NonFinite { .. } => ErrorSeverity::Error,
        }
    }

    /// Create an out of range error for a numeric value.
    pub fn out_of_range(
        field: &'static str,
        value: impl Into<f64>,
        min: impl Into<f64>,
        max: impl Into<f64>,
    ) -> Self {
        ConfigError::OutOfRange {
            field,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    /// Create a non-finite value error.
    pub fn non_finite(field: &'static str) -> Self {
        ConfigError::NonFinite { field }
    }

    /// Name of the offending field, if the error refers to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::OutOfRange { field, .. } | ConfigError::NonFinite { field } => Some(field),
            ConfigError::PwmLimitUnset => Some("max_pwm"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_out_of_range_display() {
        let err = ConfigError::out_of_range("stall_timeout_ms", 0u32, 1u32, 10_000u32);
        let msg = err.to_string();
        assert!(msg.contains("stall_timeout_ms"));
        assert!(msg.contains("[1, 10000]"));
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(ConfigError::non_finite("kd").field(), Some("kd"));
        assert_eq!(ConfigError::PwmLimitUnset.field(), Some("max_pwm"));
    }

    #[test]
    fn test_severity() {
        assert_eq!(ConfigError::PwmLimitUnset.severity(), ErrorSeverity::Critical);
        assert_eq!(ConfigError::non_finite("kp").severity(), ErrorSeverity::Error);
    }
}
