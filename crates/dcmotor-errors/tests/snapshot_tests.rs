//! Snapshot tests for error message formatting.
//!
//! Messages end up in logs next to motor telemetry, so their wording is
//! pinned here.

use dcmotor_errors::prelude::*;
use insta::assert_snapshot;

#[test]
fn test_pwm_limit_unset() {
    assert_snapshot!(
        ConfigError::PwmLimitUnset.to_string(),
        @"PWM limit is not configured; set max_pwm before driving the motor"
    );
}

#[test]
fn test_out_of_range() {
    assert_snapshot!(
        ConfigError::out_of_range("power_cutoff_hz", 0.0_f32, 0.5_f32, 10_000.0_f32).to_string(),
        @"power_cutoff_hz value 0 is out of range [0.5, 10000]"
    );
}

#[test]
fn test_non_finite() {
    assert_snapshot!(
        ConfigError::non_finite("current_sensitivity").to_string(),
        @"current_sensitivity must be a finite number"
    );
}

#[test]
fn test_motor_error_wrapper() {
    let err: MotorError = ConfigError::PwmLimitUnset.into();
    assert_snapshot!(
        err.to_string(),
        @"Configuration error: PWM limit is not configured; set max_pwm before driving the motor"
    );
}
