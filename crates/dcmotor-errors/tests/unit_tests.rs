//! Unit tests for error variants, conversions and classification.

use dcmotor_errors::prelude::*;

mod config_error_tests {
    use super::*;

    #[test]
    fn test_all_variants_display() -> Result<(), Box<dyn std::error::Error>> {
        let variants = [
            ConfigError::out_of_range("max_velocity", -1.0_f32, 0.0_f32, 100_000.0_f32),
            ConfigError::non_finite("current_sensitivity"),
            ConfigError::PwmLimitUnset,
        ];

        for variant in variants {
            let msg = variant.to_string();
            assert!(!msg.is_empty(), "ConfigError variant should have display message");
        }
        Ok(())
    }

    #[test]
    fn test_integer_values_convert_losslessly() -> Result<(), Box<dyn std::error::Error>> {
        let err = ConfigError::out_of_range("counts_per_revolution", 0u32, 1u32, u32::MAX);
        match err {
            ConfigError::OutOfRange { min, max, .. } => {
                assert!((min - 1.0).abs() < f64::EPSILON);
                assert!((max - f64::from(u32::MAX)).abs() < f64::EPSILON);
            }
            other => return Err(format!("unexpected variant {other:?}").into()),
        }
        Ok(())
    }
}

mod motor_error_tests {
    use super::*;

    #[test]
    fn test_question_mark_conversion() -> Result<(), Box<dyn std::error::Error>> {
        fn build(max_pwm: u16) -> MotorResult<u16> {
            if max_pwm == 0 {
                return Err(ConfigError::PwmLimitUnset.into());
            }
            Ok(max_pwm)
        }

        assert_eq!(build(255)?, 255);
        let err = build(0).err().ok_or("zero PWM limit should be rejected")?;
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        Ok(())
    }

    #[test]
    fn test_display_wraps_source() -> Result<(), Box<dyn std::error::Error>> {
        let err: MotorError = ConfigError::non_finite("kp").into();
        assert!(err.to_string().starts_with("Configuration error:"));
        assert!(err.to_string().contains("kp"));
        Ok(())
    }

    #[test]
    fn test_std_error_impl() -> Result<(), Box<dyn std::error::Error>> {
        let err: MotorError = ConfigError::PwmLimitUnset.into();
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_some());
        Ok(())
    }
}
