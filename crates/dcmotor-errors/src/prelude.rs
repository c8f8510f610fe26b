//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use dcmotor_errors::prelude::*;
//! use dcmotor_errors::validate_range;
//!
//! fn check_limit(current_limit: f32) -> MotorResult<()> {
//!     validate_range!("current_limit", current_limit, 0.0_f32, 10.0_f32);
//!     Ok(())
//! }
//!
//! assert!(check_limit(0.8).is_ok());
//! assert!(check_limit(12.0).is_err());
//! ```

pub use crate::{
    MotorResult,
    common::{ErrorSeverity, MotorError},
    config::ConfigError,
};

/// Return early with an out of range error when a value leaves `[min, max]`.
///
/// NaN never satisfies the range check and is reported as out of range.
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $value:expr, $min:expr, $max:expr) => {
        if !($value >= $min && $value <= $max) {
            return Err($crate::ConfigError::out_of_range($field, $value, $min, $max).into());
        }
    };
}

/// Return early with a non-finite error when a float is NaN or infinite.
#[macro_export]
macro_rules! validate_finite {
    ($field:expr, $value:expr) => {
        if !$value.is_finite() {
            return Err($crate::ConfigError::non_finite($field).into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range_macro() {
        fn check(value: f32) -> MotorResult<()> {
            validate_range!("cutoff_hz", value, 0.01_f32, 10_000.0_f32);
            Ok(())
        }
        assert!(check(2.5).is_ok());
        assert!(check(0.0).is_err());
        assert!(check(f32::NAN).is_err());
    }

    #[test]
    fn test_validate_finite_macro() {
        fn check(value: f32) -> MotorResult<()> {
            validate_finite!("kp", value);
            Ok(())
        }
        assert!(check(1.2).is_ok());
        assert!(matches!(
            check(f32::INFINITY),
            Err(MotorError::Config(ConfigError::NonFinite { field: "kp" }))
        ));
    }
}
