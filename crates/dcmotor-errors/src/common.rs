//! Top-level error type and severity classification.

use core::fmt;

use crate::ConfigError;

/// Top-level error type for the motor controller workspace.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MotorError {
    /// Configuration rejected during validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl MotorError {
    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MotorError::Config(e) => e.severity(),
        }
    }

    /// Check if the controller can continue after this error.
    ///
    /// Configuration errors leave the previous configuration in place, so a
    /// corrected value can be applied without rebuilding the controller.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, motor output must not be enabled
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Error);
        assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning > ErrorSeverity::Info);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn test_motor_error_from_config() {
        let err: MotorError = ConfigError::PwmLimitUnset.into();
        assert!(matches!(err, MotorError::Config(ConfigError::PwmLimitUnset)));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_motor_error_is_error() {
        let err: MotorError = ConfigError::non_finite("kp").into();
        let _: &dyn core::error::Error = &err;
        assert!(err.is_recoverable());
    }
}
