//! Period-based velocity estimation.
//!
//! Velocity is the reciprocal of the interval between the two most recent
//! encoder edges, not a windowed average. The estimator only recomputes when
//! new edges have arrived since its last call; otherwise it holds the last
//! magnitude. Independently of that, once the newest edge in the snapshot is
//! older than the stall window the magnitude is zero, however late the first
//! call after the motor stopped arrives.

use crate::encoder::EncoderState;

const MICROS_PER_SECOND: f32 = 1_000_000.0;
const MICROS_PER_MILLI: u64 = 1_000;

/// What happened during one [`VelocityEstimator::estimate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityUpdate {
    /// Signed velocity in counts per second
    pub velocity: f32,
    /// The raw magnitude exceeded the ceiling and was clamped
    pub ceiling_clamped: bool,
    /// Velocity was forced to zero by the stall timeout on this call
    pub stalled: bool,
    /// New edges arrived but their timestamps were equal or reversed
    pub time_anomaly: bool,
}

/// Velocity estimator state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityEstimator {
    max_velocity: f32,
    stall_timeout_ms: u32,
    magnitude: f32,
    velocity: f32,
    last_seen_transitions: u32,
}

impl VelocityEstimator {
    /// Estimator at rest.
    pub const fn new(max_velocity: f32, stall_timeout_ms: u32) -> Self {
        Self {
            max_velocity,
            stall_timeout_ms,
            magnitude: 0.0,
            velocity: 0.0,
            last_seen_transitions: 0,
        }
    }

    /// Back to rest without changing limits.
    pub fn reset(&mut self) {
        *self = Self::new(self.max_velocity, self.stall_timeout_ms);
    }

    /// Change the ceiling and stall window. Takes effect on the next call.
    pub fn set_limits(&mut self, max_velocity: f32, stall_timeout_ms: u32) {
        self.max_velocity = max_velocity;
        self.stall_timeout_ms = stall_timeout_ms;
    }

    /// Update the estimate from an encoder snapshot.
    ///
    /// `now_ms` must come from the same monotonic source as the snapshot's
    /// microsecond timestamps.
    ///
    /// 1. New edges with a positive interval set the magnitude to
    ///    `1e6 / interval`.
    /// 2. If the newest edge is older than the stall timeout the magnitude
    ///    is zero. This is checked on every call, including calls that see
    ///    new edges.
    /// 3. The magnitude is clamped to `[0, max_velocity]`.
    /// 4. The snapshot's direction provides the sign.
    pub fn estimate(&mut self, snapshot: &EncoderState, now_ms: u64) -> VelocityUpdate {
        let mut update = VelocityUpdate::default();

        if snapshot.transitions != self.last_seen_transitions {
            self.last_seen_transitions = snapshot.transitions;
            match snapshot.transition_interval_us() {
                Some(dt_us) => self.magnitude = MICROS_PER_SECOND / interval_as_f32(dt_us),
                None => update.time_anomaly = true,
            }
        }

        let idle_ms = self.idle_ms(snapshot, now_ms);
        if idle_ms > u64::from(self.stall_timeout_ms) && self.magnitude > 0.0 {
            self.magnitude = 0.0;
            update.stalled = true;
        }

        if self.magnitude > self.max_velocity {
            self.magnitude = self.max_velocity;
            update.ceiling_clamped = true;
        }
        self.magnitude = self.magnitude.max(0.0);

        self.velocity = snapshot.direction.apply(self.magnitude);
        update.velocity = self.velocity;
        update
    }

    /// Milliseconds since the newest edge in `snapshot`. A clock behind the
    /// edge timestamp reads as zero.
    #[inline]
    pub fn idle_ms(&self, snapshot: &EncoderState, now_ms: u64) -> u64 {
        now_ms.saturating_sub(snapshot.last_transition_us / MICROS_PER_MILLI)
    }

    /// Last signed estimate.
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Configured ceiling in counts per second.
    #[inline]
    pub fn max_velocity(&self) -> f32 {
        self.max_velocity
    }

    /// Configured stall window in milliseconds.
    #[inline]
    pub fn stall_timeout_ms(&self) -> u32 {
        self.stall_timeout_ms
    }
}

#[inline]
#[expect(
    clippy::cast_precision_loss,
    reason = "edge intervals are far below 2^24 us in practice"
)]
fn interval_as_f32(dt_us: u64) -> f32 {
    dt_us as f32
}
