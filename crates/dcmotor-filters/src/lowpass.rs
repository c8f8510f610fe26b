//! Single-Pole Low-Pass Filter
//!
//! Exponential smoothing driven by a cutoff frequency and the actual time
//! elapsed between samples, so a control loop with jitter still gets the
//! intended corner frequency.

use core::f32::consts::TAU;

const MICROS_PER_SECOND: f32 = 1_000_000.0;

/// State for a single-pole low-pass filter.
///
/// The smoothing coefficient is recomputed on every step from the elapsed
/// time `dt` and the time constant `rc = 1 / (2π·cutoff)`:
///
/// ```text
/// alpha = dt / (dt + rc)
/// value = value + alpha * (input - value)
/// ```
///
/// A filter built with [`LowPassFilter::new`] is unseeded: its first step
/// passes the input through unfiltered and records the timestamp. A filter
/// built with [`LowPassFilter::initialized`] starts from a known value with
/// no transient.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
/// - O(1) time complexity
/// - Bounded execution time
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LowPassFilter {
    /// Corner frequency in Hz
    pub cutoff_hz: f32,
    value: f32,
    last_update_us: u64,
    seeded: bool,
}

impl LowPassFilter {
    /// Create an unseeded filter.
    ///
    /// # Example
    ///
    /// ```
    /// use dcmotor_filters::LowPassFilter;
    ///
    /// let mut filter = LowPassFilter::new(2.5);
    /// assert!(!filter.is_seeded());
    /// assert!((filter.step(0.4, 500) - 0.4).abs() < 1e-6);
    /// assert!(filter.is_seeded());
    /// ```
    pub const fn new(cutoff_hz: f32) -> Self {
        Self {
            cutoff_hz,
            value: 0.0,
            last_update_us: 0,
            seeded: false,
        }
    }

    /// Create a filter seeded with `initial_value` at time `now_us`.
    pub const fn initialized(cutoff_hz: f32, initial_value: f32, now_us: u64) -> Self {
        Self {
            cutoff_hz,
            value: initial_value,
            last_update_us: now_us,
            seeded: true,
        }
    }

    /// Re-seed the filter in place, discarding its history.
    pub fn initialize(&mut self, initial_value: f32, now_us: u64) {
        self.value = initial_value;
        self.last_update_us = now_us;
        self.seeded = true;
    }

    /// Return to the unseeded state, keeping the cutoff.
    pub fn clear(&mut self) {
        *self = Self::new(self.cutoff_hz);
    }

    /// Feed a new sample taken at `now_us` and return the smoothed value.
    ///
    /// If the clock did not advance (or went backwards) the previous value
    /// is returned and no state changes. Non-finite samples are ignored the
    /// same way.
    ///
    /// # Example
    ///
    /// ```
    /// use dcmotor_filters::LowPassFilter;
    ///
    /// let mut filter = LowPassFilter::initialized(10.0, 0.0, 1_000);
    /// let first = filter.step(1.0, 2_000);
    /// assert!((filter.step(5.0, 2_000) - first).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn step(&mut self, input: f32, now_us: u64) -> f32 {
        if !input.is_finite() {
            return self.value;
        }
        if !self.seeded {
            self.initialize(input, now_us);
            return self.value;
        }

        let elapsed_us = match now_us.checked_sub(self.last_update_us) {
            Some(elapsed) if elapsed > 0 => elapsed,
            _ => return self.value,
        };

        let alpha = self.alpha(micros_as_seconds(elapsed_us));
        self.value += alpha * (input - self.value);
        self.last_update_us = now_us;
        self.value
    }

    /// Smoothing coefficient for a sample interval of `dt_s` seconds.
    ///
    /// Returns 0.0 (hold) for a non-positive interval or cutoff, and is
    /// always within `[0.0, 1.0]`.
    #[inline]
    pub fn alpha(&self, dt_s: f32) -> f32 {
        if dt_s.is_nan() || dt_s <= 0.0 || self.cutoff_hz.is_nan() || self.cutoff_hz <= 0.0 {
            return 0.0;
        }
        let rc = self.time_constant_s();
        (dt_s / (dt_s + rc)).clamp(0.0, 1.0)
    }

    /// Filter time constant `1 / (2π·cutoff)` in seconds.
    #[inline]
    pub fn time_constant_s(&self) -> f32 {
        1.0 / (TAU * self.cutoff_hz)
    }

    /// Current smoothed value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Timestamp of the last accepted sample.
    #[inline]
    pub fn last_update_us(&self) -> u64 {
        self.last_update_us
    }

    /// Whether the filter has a starting value.
    #[inline]
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Change the corner frequency without touching the smoothed value.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
    }
}

#[inline]
#[expect(
    clippy::cast_precision_loss,
    reason = "sample gaps beyond 2^24 us only need to saturate alpha"
)]
fn micros_as_seconds(elapsed_us: u64) -> f32 {
    elapsed_us as f32 / MICROS_PER_SECOND
}
