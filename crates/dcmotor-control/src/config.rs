//! Motor configuration.

use dcmotor_errors::{ConfigError, MotorResult, validate_finite, validate_range};

use crate::driver::Polarity;
use crate::pid::PidGains;

/// Default current limit in amps.
pub const DEFAULT_CURRENT_LIMIT_AMPS: f32 = 0.8;
/// Default current sense scale, amps per ADC unit (140 mV/A on a 10-bit, 5 V converter).
pub const DEFAULT_CURRENT_SENSITIVITY: f32 = 0.03491;
/// Default current smoothing cutoff in Hz.
pub const DEFAULT_CURRENT_CUTOFF_HZ: f32 = 2.5;
/// Default power smoothing cutoff in Hz.
pub const DEFAULT_POWER_CUTOFF_HZ: f32 = 20.0;
/// Default velocity ceiling in counts per second, the no-load speed of the motor family.
pub const DEFAULT_MAX_VELOCITY: f32 = 3200.0;
/// Default stall window in ms. 100 ms bounds the slowest measurable speed at 10 counts/s.
pub const DEFAULT_STALL_TIMEOUT_MS: u32 = 100;
/// Default integrator bound in velocity mode.
pub const DEFAULT_VELOCITY_WINDUP_LIMIT: f32 = 100.0;
/// Default integrator bound in position mode.
pub const DEFAULT_POSITION_WINDUP_LIMIT: f32 = 1000.0;
/// Default encoder resolution.
pub const DEFAULT_COUNTS_PER_REVOLUTION: u32 = 48;

const MIN_CUTOFF_HZ: f32 = 0.5;
const MAX_CUTOFF_HZ: f32 = 10_000.0;

/// What happens to the PID error history when the control mode changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeSwitchPolicy {
    /// Keep `last_error` and `error_sum` across the switch
    #[default]
    CarryOver,
    /// Clear the error history on every mode change
    Reset,
}

/// Configuration for one motor channel.
///
/// The default leaves `max_pwm` at zero, which [`MotorConfig::validate`]
/// rejects: the PWM ceiling depends on the board and must be set
/// explicitly before the controller will drive anything.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotorConfig {
    /// Advisory current limit in amps.
    pub current_limit_amps: f32,
    /// PWM ceiling. Zero means unset.
    pub max_pwm: u16,
    /// Encoder counts per output shaft revolution.
    pub counts_per_revolution: u32,
    /// Amps per raw ADC unit.
    pub current_sensitivity: f32,
    /// Current smoothing cutoff in Hz.
    pub current_cutoff_hz: f32,
    /// Power smoothing cutoff in Hz.
    pub power_cutoff_hz: f32,
    /// Velocity ceiling in counts per second.
    pub max_velocity: f32,
    /// No-edge window after which velocity is zero.
    pub stall_timeout_ms: u32,
    /// Integrator bound in velocity mode.
    pub velocity_windup_limit: f32,
    /// Integrator bound in position mode.
    pub position_windup_limit: f32,
    /// Initial PID gains.
    pub gains: PidGains,
    /// Lead polarity.
    pub polarity: Polarity,
    /// Error history handling on mode change.
    pub mode_switch: ModeSwitchPolicy,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            current_limit_amps: DEFAULT_CURRENT_LIMIT_AMPS,
            max_pwm: 0,
            counts_per_revolution: DEFAULT_COUNTS_PER_REVOLUTION,
            current_sensitivity: DEFAULT_CURRENT_SENSITIVITY,
            current_cutoff_hz: DEFAULT_CURRENT_CUTOFF_HZ,
            power_cutoff_hz: DEFAULT_POWER_CUTOFF_HZ,
            max_velocity: DEFAULT_MAX_VELOCITY,
            stall_timeout_ms: DEFAULT_STALL_TIMEOUT_MS,
            velocity_windup_limit: DEFAULT_VELOCITY_WINDUP_LIMIT,
            position_windup_limit: DEFAULT_POSITION_WINDUP_LIMIT,
            gains: PidGains::new(0.0, 0.0, 0.0),
            polarity: Polarity::Normal,
            mode_switch: ModeSwitchPolicy::CarryOver,
        }
    }
}

impl MotorConfig {
    /// Default configuration with the PWM ceiling set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PwmLimitUnset`] if `max_pwm` is zero.
    pub fn new(max_pwm: u16) -> MotorResult<Self> {
        let config = Self {
            max_pwm,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> MotorConfigBuilder {
        MotorConfigBuilder::default()
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found: an unset PWM ceiling, a
    /// non-finite float, or a value outside its range.
    pub fn validate(&self) -> MotorResult<()> {
        if self.max_pwm == 0 {
            return Err(ConfigError::PwmLimitUnset.into());
        }

        validate_finite!("current_limit_amps", self.current_limit_amps);
        validate_range!("current_limit_amps", self.current_limit_amps, 0.0_f32, 100.0_f32);

        if self.counts_per_revolution == 0 {
            return Err(ConfigError::out_of_range("counts_per_revolution", 0u32, 1u32, u32::MAX).into());
        }

        validate_finite!("current_sensitivity", self.current_sensitivity);
        validate_range!("current_sensitivity", self.current_sensitivity, 1.0e-6_f32, 10.0_f32);

        validate_finite!("current_cutoff_hz", self.current_cutoff_hz);
        validate_range!("current_cutoff_hz", self.current_cutoff_hz, MIN_CUTOFF_HZ, MAX_CUTOFF_HZ);

        validate_finite!("power_cutoff_hz", self.power_cutoff_hz);
        validate_range!("power_cutoff_hz", self.power_cutoff_hz, MIN_CUTOFF_HZ, MAX_CUTOFF_HZ);

        validate_finite!("max_velocity", self.max_velocity);
        validate_range!("max_velocity", self.max_velocity, 1.0_f32, 1.0e6_f32);

        validate_range!("stall_timeout_ms", self.stall_timeout_ms, 1u32, 60_000u32);

        validate_finite!("velocity_windup_limit", self.velocity_windup_limit);
        validate_range!("velocity_windup_limit", self.velocity_windup_limit, 1.0_f32, 1.0e6_f32);

        validate_finite!("position_windup_limit", self.position_windup_limit);
        validate_range!("position_windup_limit", self.position_windup_limit, 1.0_f32, 1.0e9_f32);

        validate_finite!("kp", self.gains.kp);
        validate_finite!("ki", self.gains.ki);
        validate_finite!("kd", self.gains.kd);

        Ok(())
    }

    /// PWM ceiling as a float bound.
    #[inline]
    pub fn max_pwm_f32(&self) -> f32 {
        f32::from(self.max_pwm)
    }
}

/// Builder for [`MotorConfig`].
#[derive(Debug, Default)]
pub struct MotorConfigBuilder {
    config: MotorConfig,
}

impl MotorConfigBuilder {
    /// Set the PWM ceiling.
    #[must_use]
    pub fn max_pwm(mut self, max_pwm: u16) -> Self {
        self.config.max_pwm = max_pwm;
        self
    }

    /// Set the advisory current limit in amps.
    #[must_use]
    pub fn current_limit_amps(mut self, amps: f32) -> Self {
        self.config.current_limit_amps = amps;
        self
    }

    /// Set the encoder resolution.
    #[must_use]
    pub fn counts_per_revolution(mut self, counts: u32) -> Self {
        self.config.counts_per_revolution = counts;
        self
    }

    /// Set the current sense scale in amps per ADC unit.
    #[must_use]
    pub fn current_sensitivity(mut self, amps_per_unit: f32) -> Self {
        self.config.current_sensitivity = amps_per_unit;
        self
    }

    /// Set the current smoothing cutoff.
    #[must_use]
    pub fn current_cutoff_hz(mut self, hz: f32) -> Self {
        self.config.current_cutoff_hz = hz;
        self
    }

    /// Set the power smoothing cutoff.
    #[must_use]
    pub fn power_cutoff_hz(mut self, hz: f32) -> Self {
        self.config.power_cutoff_hz = hz;
        self
    }

    /// Set the velocity ceiling.
    #[must_use]
    pub fn max_velocity(mut self, counts_per_second: f32) -> Self {
        self.config.max_velocity = counts_per_second;
        self
    }

    /// Set the stall window.
    #[must_use]
    pub fn stall_timeout_ms(mut self, ms: u32) -> Self {
        self.config.stall_timeout_ms = ms;
        self
    }

    /// Set both integrator bounds.
    #[must_use]
    pub fn windup_limits(mut self, velocity: f32, position: f32) -> Self {
        self.config.velocity_windup_limit = velocity;
        self.config.position_windup_limit = position;
        self
    }

    /// Set the initial PID gains.
    #[must_use]
    pub fn gains(mut self, gains: PidGains) -> Self {
        self.config.gains = gains;
        self
    }

    /// Set the lead polarity.
    #[must_use]
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.config.polarity = polarity;
        self
    }

    /// Set the mode switch policy.
    #[must_use]
    pub fn mode_switch(mut self, policy: ModeSwitchPolicy) -> Self {
        self.config.mode_switch = policy;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> MotorResult<MotorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
