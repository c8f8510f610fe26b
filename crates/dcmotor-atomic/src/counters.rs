//! Clamp and anomaly counters for the control loop.
//!
//! [`ClampCounters`] is shared between the update cycle, which records
//! events, and whatever reports diagnostics. All operations use
//! `Ordering::Relaxed`: the counters are independent tallies and nothing
//! synchronizes on them.
//!
//! `portable-atomic` provides 64-bit atomics on targets that lack them
//! natively (Cortex-M0, AVR) when the `critical-section` feature is enabled.

use portable_atomic::{AtomicU64, Ordering};

/// A numeric policy that altered a value inside the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClampEvent {
    /// Commanded duty exceeded the PWM ceiling and was clamped.
    PwmSaturated,
    /// Velocity estimate exceeded the configured maximum and was clamped.
    VelocityCeiling,
    /// Integrator sum hit its windup bound.
    IntegratorSaturated,
    /// Smoothed power had the wrong sign for the velocity setpoint.
    SignClamped,
    /// No encoder transition within the stall timeout; velocity forced to zero.
    StallDetected,
    /// Smoothed current exceeded the configured limit.
    CurrentLimitExceeded,
    /// Clock did not advance, or encoder timestamps were out of order.
    TimeAnomaly,
}

impl ClampEvent {
    /// Every event, in snapshot field order.
    pub const ALL: [ClampEvent; 7] = [
        ClampEvent::PwmSaturated,
        ClampEvent::VelocityCeiling,
        ClampEvent::IntegratorSaturated,
        ClampEvent::SignClamped,
        ClampEvent::StallDetected,
        ClampEvent::CurrentLimitExceeded,
        ClampEvent::TimeAnomaly,
    ];

    /// Short lowercase name, suitable for log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            ClampEvent::PwmSaturated => "pwm_saturated",
            ClampEvent::VelocityCeiling => "velocity_ceiling",
            ClampEvent::IntegratorSaturated => "integrator_saturated",
            ClampEvent::SignClamped => "sign_clamped",
            ClampEvent::StallDetected => "stall_detected",
            ClampEvent::CurrentLimitExceeded => "current_limit_exceeded",
            ClampEvent::TimeAnomaly => "time_anomaly",
        }
    }
}

impl core::fmt::Display for ClampEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time copy of [`ClampCounters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClampSnapshot {
    /// Completed update cycles
    pub cycles: u64,
    /// Cycles where the PWM duty was clamped to the ceiling
    pub pwm_saturations: u64,
    /// Velocity estimates clamped to the configured maximum
    pub velocity_ceiling_clamps: u64,
    /// Integrator windup bound hits
    pub integrator_saturations: u64,
    /// Smoothed power values clamped to the setpoint's sign
    pub sign_clamps: u64,
    /// Stall timeouts that zeroed the velocity
    pub stall_events: u64,
    /// Cycles where smoothed current exceeded the limit
    pub current_limit_exceedances: u64,
    /// Ignored clock or timestamp anomalies
    pub time_anomalies: u64,
}

impl ClampSnapshot {
    /// Count recorded for a single event kind.
    #[must_use]
    pub const fn get(&self, event: ClampEvent) -> u64 {
        match event {
            ClampEvent::PwmSaturated => self.pwm_saturations,
            ClampEvent::VelocityCeiling => self.velocity_ceiling_clamps,
            ClampEvent::IntegratorSaturated => self.integrator_saturations,
            ClampEvent::SignClamped => self.sign_clamps,
            ClampEvent::StallDetected => self.stall_events,
            ClampEvent::CurrentLimitExceeded => self.current_limit_exceedances,
            ClampEvent::TimeAnomaly => self.time_anomalies,
        }
    }

    /// Sum of all event counters (cycles excluded).
    #[must_use]
    pub fn total_events(&self) -> u64 {
        ClampEvent::ALL
            .iter()
            .fold(0u64, |acc, event| acc.saturating_add(self.get(*event)))
    }

    /// Share of cycles in which the PWM duty saturated, in percent.
    ///
    /// Returns 0.0 before the first cycle.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "percentages tolerate rounding")]
    pub fn pwm_saturation_percent(&self) -> f32 {
        if self.cycles == 0 {
            return 0.0;
        }
        (self.pwm_saturations as f32 / self.cycles as f32) * 100.0
    }
}

/// Lock-free counters for control loop clamp events.
///
/// # RT Safety
///
/// `inc_cycle` and `record` are a single relaxed fetch-add. Safe to call from
/// the control loop; never called from encoder interrupt handlers.
///
/// # Example
///
/// ```rust
/// use dcmotor_atomic::{ClampCounters, ClampEvent};
///
/// let counters = ClampCounters::new();
/// counters.record(ClampEvent::IntegratorSaturated);
/// counters.record(ClampEvent::IntegratorSaturated);
/// assert_eq!(counters.count(ClampEvent::IntegratorSaturated), 2);
///
/// let drained = counters.snapshot_and_reset();
/// assert_eq!(drained.integrator_saturations, 2);
/// assert_eq!(counters.snapshot().integrator_saturations, 0);
/// ```
#[derive(Debug)]
pub struct ClampCounters {
    cycles: AtomicU64,
    pwm_saturations: AtomicU64,
    velocity_ceiling_clamps: AtomicU64,
    integrator_saturations: AtomicU64,
    sign_clamps: AtomicU64,
    stall_events: AtomicU64,
    current_limit_exceedances: AtomicU64,
    time_anomalies: AtomicU64,
}

impl Default for ClampCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl ClampCounters {
    /// Create a set of counters, all zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cycles: AtomicU64::new(0),
            pwm_saturations: AtomicU64::new(0),
            velocity_ceiling_clamps: AtomicU64::new(0),
            integrator_saturations: AtomicU64::new(0),
            sign_clamps: AtomicU64::new(0),
            stall_events: AtomicU64::new(0),
            current_limit_exceedances: AtomicU64::new(0),
            time_anomalies: AtomicU64::new(0),
        }
    }

    fn slot(&self, event: ClampEvent) -> &AtomicU64 {
        match event {
            ClampEvent::PwmSaturated => &self.pwm_saturations,
            ClampEvent::VelocityCeiling => &self.velocity_ceiling_clamps,
            ClampEvent::IntegratorSaturated => &self.integrator_saturations,
            ClampEvent::SignClamped => &self.sign_clamps,
            ClampEvent::StallDetected => &self.stall_events,
            ClampEvent::CurrentLimitExceeded => &self.current_limit_exceedances,
            ClampEvent::TimeAnomaly => &self.time_anomalies,
        }
    }

    /// Count one completed update cycle.
    #[inline]
    pub fn inc_cycle(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one occurrence of `event`.
    #[inline]
    pub fn record(&self, event: ClampEvent) {
        self.slot(event).fetch_add(1, Ordering::Relaxed);
    }

    /// Count `event` only when `happened` is true. Returns `happened`.
    #[inline]
    pub fn record_if(&self, happened: bool, event: ClampEvent) -> bool {
        if happened {
            self.record(event);
        }
        happened
    }

    /// Current value for a single event kind.
    #[inline]
    #[must_use]
    pub fn count(&self, event: ClampEvent) -> u64 {
        self.slot(event).load(Ordering::Relaxed)
    }

    /// Completed update cycles.
    #[inline]
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Read every counter without resetting.
    ///
    /// Counters are read one by one; the snapshot is not atomic across fields.
    #[must_use]
    pub fn snapshot(&self) -> ClampSnapshot {
        ClampSnapshot {
            cycles: self.cycles.load(Ordering::Relaxed),
            pwm_saturations: self.pwm_saturations.load(Ordering::Relaxed),
            velocity_ceiling_clamps: self.velocity_ceiling_clamps.load(Ordering::Relaxed),
            integrator_saturations: self.integrator_saturations.load(Ordering::Relaxed),
            sign_clamps: self.sign_clamps.load(Ordering::Relaxed),
            stall_events: self.stall_events.load(Ordering::Relaxed),
            current_limit_exceedances: self.current_limit_exceedances.load(Ordering::Relaxed),
            time_anomalies: self.time_anomalies.load(Ordering::Relaxed),
        }
    }

    /// Read every counter and zero it.
    #[must_use]
    pub fn snapshot_and_reset(&self) -> ClampSnapshot {
        ClampSnapshot {
            cycles: self.cycles.swap(0, Ordering::Relaxed),
            pwm_saturations: self.pwm_saturations.swap(0, Ordering::Relaxed),
            velocity_ceiling_clamps: self.velocity_ceiling_clamps.swap(0, Ordering::Relaxed),
            integrator_saturations: self.integrator_saturations.swap(0, Ordering::Relaxed),
            sign_clamps: self.sign_clamps.swap(0, Ordering::Relaxed),
            stall_events: self.stall_events.swap(0, Ordering::Relaxed),
            current_limit_exceedances: self.current_limit_exceedances.swap(0, Ordering::Relaxed),
            time_anomalies: self.time_anomalies.swap(0, Ordering::Relaxed),
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.cycles.store(0, Ordering::Relaxed);
        for event in ClampEvent::ALL {
            self.slot(event).store(0, Ordering::Relaxed);
        }
    }
}
