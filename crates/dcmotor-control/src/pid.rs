//! PID control law with per-mode anti-windup bounds.
//!
//! One controller state serves both control targets. The error history
//! (`last_error`, `error_sum`) is shared between velocity and position
//! commands; whether it is cleared on a mode change is the caller's policy.

/// Proportional, integral and derivative gains.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PidGains {
    /// Proportional gain
    pub kp: f32,
    /// Integral gain
    pub ki: f32,
    /// Derivative gain
    pub kd: f32,
}

impl PidGains {
    /// Gains from their three terms.
    pub const fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self { kp, ki, kd }
    }

    /// Whether every gain is a finite number.
    pub fn is_finite(&self) -> bool {
        self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite()
    }
}

/// Result of one control step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PidOutput {
    /// `kp*error + ki*error_sum + kd*d_error`
    pub raw: f32,
    /// Error on this step
    pub error: f32,
    /// Integrator after clamping
    pub error_sum: f32,
    /// The integrator hit its bound on this step
    pub integrator_saturated: bool,
}

/// Stateful PID controller.
///
/// # Example
///
/// ```
/// use dcmotor_control::pid::{PidController, PidGains};
///
/// let mut pid = PidController::new(PidGains::new(1.2, 0.8, 0.0), 100.0, 1000.0);
/// let out = pid.velocity_command(1000.0, 0.0);
/// assert!((out.error_sum - 100.0).abs() < 1e-6);
/// assert!((out.raw - 1280.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidController {
    gains: PidGains,
    velocity_windup_limit: f32,
    position_windup_limit: f32,
    last_error: f32,
    error_sum: f32,
}

impl PidController {
    /// Controller with empty error history.
    pub const fn new(gains: PidGains, velocity_windup_limit: f32, position_windup_limit: f32) -> Self {
        Self {
            gains,
            velocity_windup_limit,
            position_windup_limit,
            last_error: 0.0,
            error_sum: 0.0,
        }
    }

    /// Velocity-mode step, integrator bounded by the velocity windup limit.
    pub fn velocity_command(&mut self, desired: f32, measured: f32) -> PidOutput {
        self.step(desired - measured, self.velocity_windup_limit)
    }

    /// Position-mode step, integrator bounded by the position windup limit.
    pub fn position_command(&mut self, desired: i32, measured: i32) -> PidOutput {
        let error = i64::from(desired) - i64::from(measured);
        self.step(count_as_f32(error), self.position_windup_limit)
    }

    fn step(&mut self, error: f32, windup_limit: f32) -> PidOutput {
        let d_error = error - self.last_error;
        let unclamped = self.error_sum + error;
        let integrator_saturated = unclamped > windup_limit || unclamped < -windup_limit;
        self.error_sum = unclamped.clamp(-windup_limit, windup_limit);
        self.last_error = error;

        let raw = self.gains.kp * error + self.gains.ki * self.error_sum + self.gains.kd * d_error;
        PidOutput {
            raw,
            error,
            error_sum: self.error_sum,
            integrator_saturated,
        }
    }

    /// Clear the error history; gains and limits are kept.
    pub fn reset(&mut self) {
        self.last_error = 0.0;
        self.error_sum = 0.0;
    }

    /// Replace the gains. Error history is kept.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    /// Replace both windup limits. The integrator is re-bounded on the next step.
    pub fn set_windup_limits(&mut self, velocity: f32, position: f32) {
        self.velocity_windup_limit = velocity;
        self.position_windup_limit = position;
    }

    /// Current gains.
    #[inline]
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// Error from the previous step.
    #[inline]
    pub fn last_error(&self) -> f32 {
        self.last_error
    }

    /// Integrator value.
    #[inline]
    pub fn error_sum(&self) -> f32 {
        self.error_sum
    }
}

#[inline]
#[expect(
    clippy::cast_precision_loss,
    reason = "position errors beyond 2^24 counts lose only sub-count precision"
)]
fn count_as_f32(count: i64) -> f32 {
    count as f32
}
