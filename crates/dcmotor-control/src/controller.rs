//! The motor controller: one update cycle over encoder, PID and driver.

use core::borrow::Borrow;

use dcmotor_atomic::{ClampCounters, ClampEvent};
use dcmotor_errors::MotorResult;
use dcmotor_filters::LowPassFilter;
use dcmotor_hal::{AnalogInput, DigitalInput, MotorHal};
use tracing::{debug, error, info, warn};

use crate::config::{ModeSwitchPolicy, MotorConfig};
use crate::driver::{DriveCommand, DriveOutput, MotorDriver, Polarity};
use crate::encoder::{EncoderState, QuadratureEncoder};
use crate::pid::{PidController, PidGains, PidOutput};
use crate::velocity::VelocityEstimator;

/// Active control target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlMode {
    /// Track a velocity in counts per second
    Velocity {
        /// Setpoint
        target: f32,
    },
    /// Track an encoder position in counts
    Position {
        /// Setpoint
        target: i32,
    },
}

impl ControlMode {
    /// Whether `other` selects the same target kind.
    #[inline]
    pub fn same_kind(&self, other: &ControlMode) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    /// Short name for log fields.
    pub const fn name(&self) -> &'static str {
        match self {
            ControlMode::Velocity { .. } => "velocity",
            ControlMode::Position { .. } => "position",
        }
    }

    fn sign_range(&self) -> SignRange {
        match *self {
            ControlMode::Velocity { target } if target < 0.0 => SignRange::NonPositive,
            ControlMode::Velocity { .. } => SignRange::NonNegative,
            ControlMode::Position { .. } => SignRange::Symmetric,
        }
    }
}

impl Default for ControlMode {
    fn default() -> Self {
        ControlMode::Velocity { target: 0.0 }
    }
}

/// Signed range the smoothed power is clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignRange {
    NonNegative,
    NonPositive,
    Symmetric,
}

impl SignRange {
    /// Returns `(clamped, sign_clamped, saturated)`.
    fn apply(self, power: f32, max_pwm: f32) -> (f32, bool, bool) {
        match self {
            SignRange::NonNegative => (power.clamp(0.0, max_pwm), power < 0.0, power > max_pwm),
            SignRange::NonPositive => (power.clamp(-max_pwm, 0.0), power > 0.0, power < -max_pwm),
            SignRange::Symmetric => (power.clamp(-max_pwm, max_pwm), false, power.abs() > max_pwm),
        }
    }
}

/// Everything one [`DcMotorController::update`] call computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// Mode that was active for this cycle
    pub mode: ControlMode,
    /// Encoder snapshot the cycle worked from
    pub encoder: EncoderState,
    /// Signed velocity estimate in counts per second
    pub velocity: f32,
    /// Smoothed motor current in amps
    pub current: f32,
    /// PID step result
    pub pid: PidOutput,
    /// PID output after the power filter
    pub smoothed_power: f32,
    /// Integer power handed to the driver
    pub commanded_power: i32,
    /// What the driver wrote
    pub output: DriveOutput,
}

/// Closed-loop controller for one DC motor.
///
/// Owns its HAL, configuration and loop state. The encoder is held through
/// `E`: by value for host simulation ([`DcMotorController::new`]), or as a
/// shared reference to a `static` [`QuadratureEncoder`] on a target
/// ([`DcMotorController::with_encoder`]). In the second form the interrupt
/// handlers call the encoder directly and never touch the controller, so
/// `update` runs with interrupts enabled and only its encoder snapshot is a
/// critical section.
///
/// # Interrupt-driven targets
///
/// ```
/// use dcmotor_control::prelude::*;
/// use dcmotor_hal::prelude::*;
///
/// static ENCODER: QuadratureEncoder = QuadratureEncoder::new(0);
///
/// // Encoder A interrupt, with the pin levels and clock read by the handler.
/// fn on_edge_a(a: Level, b: Level, now_us: u64) {
///     ENCODER.on_channel_a(a, b, now_us);
/// }
///
/// let config = MotorConfig::new(255)?;
/// let mut motor = DcMotorController::with_encoder(SimulatedHal::new(), &ENCODER, config)?;
/// motor.hal_mut().advance_us(500);
/// on_edge_a(Level::High, Level::Low, 500);
/// motor.update();
/// assert_eq!(motor.position(), 1);
/// # Ok::<(), dcmotor_errors::MotorError>(())
/// ```
///
/// # Example
///
/// ```
/// use dcmotor_control::prelude::*;
/// use dcmotor_hal::prelude::*;
///
/// let config = MotorConfig::builder()
///     .max_pwm(255)
///     .gains(PidGains::new(1.2, 0.8, 0.0))
///     .build()?;
/// let mut motor = DcMotorController::new(SimulatedHal::new(), config)?;
///
/// motor.set_desired_velocity(1000.0);
/// motor.hal_mut().advance_ms(10);
/// let report = motor.update();
///
/// assert_eq!(report.output.state, BridgeState::Forward);
/// assert_eq!(motor.hal().pwm_duty(PwmOutput::Power), 255);
/// # Ok::<(), dcmotor_errors::MotorError>(())
/// ```
#[derive(Debug)]
pub struct DcMotorController<H: MotorHal, E = QuadratureEncoder> {
    hal: H,
    config: MotorConfig,
    mode: ControlMode,
    encoder: E,
    velocity: VelocityEstimator,
    pid: PidController,
    current_filter: LowPassFilter,
    power_filter: LowPassFilter,
    counters: ClampCounters,
    last_report: Option<CycleReport>,
}

impl<H: MotorHal> DcMotorController<H> {
    /// Validate `config`, take ownership of `hal` and initialize with an
    /// encoder owned by the controller.
    ///
    /// Edges reach this encoder through [`Self::on_encoder_a`] and
    /// [`Self::on_encoder_b`], which suits host simulation where one thread
    /// drives both. See [`DcMotorController::with_encoder`] for interrupt
    /// driven targets.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid, including an unset PWM
    /// ceiling.
    pub fn new(hal: H, config: MotorConfig) -> MotorResult<Self> {
        Self::with_encoder(hal, QuadratureEncoder::new(0), config)
    }
}

impl<H: MotorHal, E: Borrow<QuadratureEncoder>> DcMotorController<H, E> {
    /// Validate `config`, take ownership of `hal` and initialize around
    /// `encoder`.
    ///
    /// The encoder is reset to the current time, the current filter is
    /// seeded from a first measurement and the power filter from zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid, including an unset PWM
    /// ceiling.
    pub fn with_encoder(mut hal: H, encoder: E, config: MotorConfig) -> MotorResult<Self> {
        if let Err(err) = config.validate() {
            error!(
                severity = %err.severity(),
                recoverable = err.is_recoverable(),
                %err,
                "motor configuration rejected"
            );
            return Err(err);
        }

        let now_us = hal.micros();
        let initial_current = measure_current(&mut hal, &config);
        encoder.borrow().reset(now_us);

        info!(
            max_pwm = config.max_pwm,
            current_limit_amps = config.current_limit_amps,
            counts_per_revolution = config.counts_per_revolution,
            initial_current,
            "motor controller initialized"
        );

        Ok(Self {
            mode: ControlMode::default(),
            encoder,
            velocity: VelocityEstimator::new(config.max_velocity, config.stall_timeout_ms),
            pid: PidController::new(
                config.gains,
                config.velocity_windup_limit,
                config.position_windup_limit,
            ),
            current_filter: LowPassFilter::initialized(
                config.current_cutoff_hz,
                initial_current,
                now_us,
            ),
            power_filter: LowPassFilter::initialized(config.power_cutoff_hz, 0.0, now_us),
            counters: ClampCounters::new(),
            last_report: None,
            config,
            hal,
        })
    }

    /// Re-initialize loop state as at construction.
    ///
    /// Position returns to zero, filters are re-seeded and the PID error
    /// history is cleared. Mode, setpoint, gains and counters are kept.
    pub fn reset(&mut self) {
        let now_us = self.hal.micros();
        let initial_current = measure_current(&mut self.hal, &self.config);

        self.encoder.borrow().reset(now_us);
        self.velocity.reset();
        self.pid.reset();
        self.current_filter.initialize(initial_current, now_us);
        self.power_filter.initialize(0.0, now_us);
        self.last_report = None;

        info!(initial_current, "motor controller re-initialized");
    }

    /// Run one control cycle and drive the outputs.
    pub fn update(&mut self) -> CycleReport {
        let now_us = self.hal.micros();
        let now_ms = self.hal.millis();
        let snapshot = self.encoder.borrow().snapshot();

        let estimate = self.velocity.estimate(&snapshot, now_ms);
        self.counters.record_if(estimate.ceiling_clamped, ClampEvent::VelocityCeiling);
        self.counters.record_if(estimate.time_anomaly, ClampEvent::TimeAnomaly);
        if self.counters.record_if(estimate.stalled, ClampEvent::StallDetected) {
            debug!(
                position = snapshot.position,
                timeout_ms = self.config.stall_timeout_ms,
                "no encoder activity, velocity forced to zero"
            );
        }

        let current = self.current_filter.step(measure_current(&mut self.hal, &self.config), now_us);
        if current > self.config.current_limit_amps {
            self.counters.record(ClampEvent::CurrentLimitExceeded);
            warn!(
                current,
                limit = self.config.current_limit_amps,
                "motor current above limit"
            );
        }

        let pid = match self.mode {
            ControlMode::Velocity { target } => self.pid.velocity_command(target, estimate.velocity),
            ControlMode::Position { target } => self.pid.position_command(target, snapshot.position),
        };
        self.counters.record_if(pid.integrator_saturated, ClampEvent::IntegratorSaturated);

        if now_us <= self.power_filter.last_update_us() {
            self.counters.record(ClampEvent::TimeAnomaly);
        }
        let smoothed_power = self.power_filter.step(pid.raw, now_us);

        let (bounded, sign_clamped, saturated) = self
            .mode
            .sign_range()
            .apply(smoothed_power, self.config.max_pwm_f32());
        self.counters.record_if(sign_clamped, ClampEvent::SignClamped);

        let commanded_power = truncate_power(bounded);
        let output = MotorDriver::drive(
            &mut self.hal,
            DriveCommand::new(commanded_power, self.config.polarity),
            self.config.max_pwm,
        );
        self.counters.record_if(saturated || output.saturated, ClampEvent::PwmSaturated);
        self.counters.inc_cycle();

        let report = CycleReport {
            mode: self.mode,
            encoder: snapshot,
            velocity: estimate.velocity,
            current,
            pid,
            smoothed_power,
            commanded_power,
            output,
        };
        self.last_report = Some(report);
        report
    }

    /// Channel-A edge: sample both encoder pins and the clock through the
    /// HAL and record the transition.
    ///
    /// Interrupt handlers on a target call [`QuadratureEncoder::on_channel_a`]
    /// on the shared encoder instead, so they never need the controller.
    #[inline]
    pub fn on_encoder_a(&self) {
        let a = self.hal.read_digital(DigitalInput::EncoderA);
        let b = self.hal.read_digital(DigitalInput::EncoderB);
        self.encoder.borrow().on_channel_a(a, b, self.hal.micros());
    }

    /// Channel-B edge: stamp the transition time from the HAL clock.
    #[inline]
    pub fn on_encoder_b(&self) {
        self.encoder.borrow().on_channel_b(self.hal.micros());
    }

    /// Select velocity mode with `target` counts per second.
    ///
    /// Non-finite targets are ignored.
    pub fn set_desired_velocity(&mut self, target: f32) {
        if !target.is_finite() {
            warn!(setpoint = target, "ignoring non-finite velocity setpoint");
            return;
        }
        self.switch_mode(ControlMode::Velocity { target });
    }

    /// Select position mode with `target` encoder counts.
    pub fn set_desired_position(&mut self, target: i32) {
        self.switch_mode(ControlMode::Position { target });
    }

    fn switch_mode(&mut self, next: ControlMode) {
        if !self.mode.same_kind(&next) {
            let reset = self.config.mode_switch == ModeSwitchPolicy::Reset;
            if reset {
                self.pid.reset();
            }
            info!(
                from = self.mode.name(),
                to = next.name(),
                pid_reset = reset,
                "control mode changed"
            );
        }
        self.mode = next;
    }

    /// Replace the PID gains. Error history is kept.
    ///
    /// Gains with a non-finite term are ignored.
    pub fn set_pid_gains(&mut self, gains: PidGains) {
        if !gains.is_finite() {
            warn!(kp = gains.kp, ki = gains.ki, kd = gains.kd, "ignoring non-finite PID gains");
            return;
        }
        self.config.gains = gains;
        self.pid.set_gains(gains);
        debug!(kp = gains.kp, ki = gains.ki, kd = gains.kd, "PID gains updated");
    }

    /// Set the advisory current limit in amps.
    ///
    /// Negative or non-finite limits are ignored.
    pub fn set_current_limit(&mut self, amps: f32) {
        if !amps.is_finite() || amps < 0.0 {
            warn!(amps, "ignoring invalid current limit");
            return;
        }
        self.config.current_limit_amps = amps;
        debug!(amps, "current limit updated");
    }

    /// Set the PWM ceiling. Zero stops the motor on the next cycle.
    pub fn set_pwm_limit(&mut self, max_pwm: u16) {
        if max_pwm == 0 {
            warn!("PWM limit set to zero, motor output disabled");
        }
        self.config.max_pwm = max_pwm;
        debug!(max_pwm, "PWM limit updated");
    }

    /// Set the lead polarity.
    pub fn set_polarity(&mut self, polarity: Polarity) {
        self.config.polarity = polarity;
        debug!(?polarity, "polarity updated");
    }

    /// Encoder position in counts.
    #[inline]
    pub fn position(&self) -> i32 {
        self.encoder.borrow().position()
    }

    /// Encoder position in output shaft revolutions.
    pub fn position_revolutions(&self) -> f32 {
        count_as_f32(self.position()) / resolution_as_f32(self.config.counts_per_revolution)
    }

    /// Last velocity estimate in counts per second.
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity.velocity()
    }

    /// Last velocity estimate in output shaft revolutions per second.
    pub fn velocity_rps(&self) -> f32 {
        self.velocity() / resolution_as_f32(self.config.counts_per_revolution)
    }

    /// Smoothed motor current in amps.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current_filter.value()
    }

    /// Active control mode and setpoint.
    #[inline]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Current configuration, including setter changes.
    #[inline]
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Clamp and anomaly counters.
    #[inline]
    pub fn counters(&self) -> &ClampCounters {
        &self.counters
    }

    /// PID state.
    #[inline]
    pub fn pid(&self) -> &PidController {
        &self.pid
    }

    /// Report from the most recent update, if any since (re)initialization.
    #[inline]
    pub fn last_report(&self) -> Option<&CycleReport> {
        self.last_report.as_ref()
    }

    /// Shared encoder state.
    #[inline]
    pub fn encoder(&self) -> &QuadratureEncoder {
        self.encoder.borrow()
    }

    /// The HAL.
    #[inline]
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// The HAL, mutably.
    #[inline]
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    /// Give the HAL back.
    pub fn into_hal(self) -> H {
        self.hal
    }
}

fn measure_current<H: MotorHal>(hal: &mut H, config: &MotorConfig) -> f32 {
    f32::from(hal.read_analog(AnalogInput::CurrentSense)) * config.current_sensitivity
}

#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "bounded to the u16 PWM range before the cast"
)]
fn truncate_power(power: f32) -> i32 {
    power as i32
}

#[inline]
#[expect(clippy::cast_precision_loss, reason = "display-only unit conversion")]
fn count_as_f32(count: i32) -> f32 {
    count as f32
}

#[inline]
#[expect(clippy::cast_precision_loss, reason = "display-only unit conversion")]
fn resolution_as_f32(counts_per_revolution: u32) -> f32 {
    counts_per_revolution as f32
}
