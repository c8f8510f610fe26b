//! Software implementation of [`MotorHal`] for tests and host simulation.

use std::vec::Vec;

use crate::hal::MotorHal;
use crate::pins::{AnalogInput, DigitalInput, DigitalOutput, Level, PwmOutput};

/// Writes kept by [`SimulatedHal::new`] before the oldest are dropped.
pub const DEFAULT_WRITE_LOG_LIMIT: usize = 4_096;

/// One output write observed by [`SimulatedHal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalWrite {
    /// A direction pin was written.
    Digital {
        /// Pin written
        output: DigitalOutput,
        /// Level written
        level: Level,
        /// Simulated time of the write
        at_us: u64,
    },
    /// A PWM duty was written.
    Pwm {
        /// Output written
        output: PwmOutput,
        /// Duty written
        duty: u16,
        /// Simulated time of the write
        at_us: u64,
    },
}

/// In-memory motor board.
///
/// Inputs (encoder levels, ADC reading) are set by the test. Outputs are
/// latched and every write is appended to a log holding the most recent
/// [`DEFAULT_WRITE_LOG_LIMIT`] entries (see [`SimulatedHal::with_write_log_limit`]),
/// so long simulations run in bounded memory. Time only moves when the test
/// advances it; `millis` is always `micros / 1000`.
///
/// # Example
///
/// ```rust
/// use dcmotor_hal::prelude::*;
///
/// let mut hal = SimulatedHal::new();
/// hal.write_digital(DigitalOutput::Direction2, Level::High);
/// hal.write_pwm(PwmOutput::Power, 40);
///
/// assert_eq!(hal.digital_output(DigitalOutput::Direction2), Level::High);
/// assert_eq!(hal.writes().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedHal {
    now_us: u64,
    encoder_a: Level,
    encoder_b: Level,
    current_sense: u16,
    direction1: Level,
    direction2: Level,
    power_duty: u16,
    writes: Vec<HalWrite>,
    write_log_limit: usize,
    dropped_writes: u64,
}

impl Default for SimulatedHal {
    fn default() -> Self {
        Self {
            now_us: 0,
            encoder_a: Level::Low,
            encoder_b: Level::Low,
            current_sense: 0,
            direction1: Level::Low,
            direction2: Level::Low,
            power_duty: 0,
            writes: Vec::new(),
            write_log_limit: DEFAULT_WRITE_LOG_LIMIT,
            dropped_writes: 0,
        }
    }
}

impl SimulatedHal {
    /// Board at time zero with all inputs low and outputs off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` writes in the log, dropping the oldest first.
    /// A limit of zero disables logging; latched outputs still update.
    #[must_use]
    pub fn with_write_log_limit(mut self, limit: usize) -> Self {
        self.write_log_limit = limit;
        self.trim_writes();
        self
    }

    /// Board starting at `now_us`.
    #[must_use]
    pub fn starting_at(now_us: u64) -> Self {
        Self {
            now_us,
            ..Self::default()
        }
    }

    /// Move the clock forward by `us` microseconds, saturating.
    pub fn advance_us(&mut self, us: u64) {
        self.now_us = self.now_us.saturating_add(us);
    }

    /// Move the clock forward by `ms` milliseconds, saturating.
    pub fn advance_ms(&mut self, ms: u64) {
        self.advance_us(ms.saturating_mul(1_000));
    }

    /// Set the clock to an absolute time. May go backwards, to exercise
    /// clock anomaly handling.
    pub fn set_time_us(&mut self, now_us: u64) {
        self.now_us = now_us;
    }

    /// Set an encoder input level.
    pub fn set_digital_input(&mut self, input: DigitalInput, level: Level) {
        match input {
            DigitalInput::EncoderA => self.encoder_a = level,
            DigitalInput::EncoderB => self.encoder_b = level,
        }
    }

    /// Set both encoder levels at once.
    pub fn set_encoder(&mut self, a: Level, b: Level) {
        self.encoder_a = a;
        self.encoder_b = b;
    }

    /// Set the raw reading returned for an analog input.
    pub fn set_analog(&mut self, input: AnalogInput, raw: u16) {
        match input {
            AnalogInput::CurrentSense => self.current_sense = raw,
        }
    }

    /// Last level written to a direction output.
    #[must_use]
    pub fn digital_output(&self, output: DigitalOutput) -> Level {
        match output {
            DigitalOutput::Direction1 => self.direction1,
            DigitalOutput::Direction2 => self.direction2,
        }
    }

    /// Both direction outputs, `(Direction1, Direction2)`.
    #[must_use]
    pub fn direction_pins(&self) -> (Level, Level) {
        (self.direction1, self.direction2)
    }

    /// Last duty written to a PWM output.
    #[must_use]
    pub fn pwm_duty(&self, output: PwmOutput) -> u16 {
        match output {
            PwmOutput::Power => self.power_duty,
        }
    }

    /// Logged output writes, oldest first.
    #[must_use]
    pub fn writes(&self) -> &[HalWrite] {
        &self.writes
    }

    /// Writes dropped from the front of the log to respect its limit.
    #[must_use]
    pub fn dropped_writes(&self) -> u64 {
        self.dropped_writes
    }

    /// Forget recorded writes; latched outputs are kept.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    fn log(&mut self, write: HalWrite) {
        self.writes.push(write);
        self.trim_writes();
    }

    fn trim_writes(&mut self) {
        let excess = self.writes.len().saturating_sub(self.write_log_limit);
        if excess > 0 {
            self.writes.drain(..excess);
            self.dropped_writes = self.dropped_writes.saturating_add(u64::try_from(excess).unwrap_or(u64::MAX));
        }
    }
}

impl MotorHal for SimulatedHal {
    fn write_digital(&mut self, output: DigitalOutput, level: Level) {
        match output {
            DigitalOutput::Direction1 => self.direction1 = level,
            DigitalOutput::Direction2 => self.direction2 = level,
        }
        self.log(HalWrite::Digital {
            output,
            level,
            at_us: self.now_us,
        });
    }

    fn read_digital(&self, input: DigitalInput) -> Level {
        match input {
            DigitalInput::EncoderA => self.encoder_a,
            DigitalInput::EncoderB => self.encoder_b,
        }
    }

    fn read_analog(&mut self, input: AnalogInput) -> u16 {
        match input {
            AnalogInput::CurrentSense => self.current_sense,
        }
    }

    fn write_pwm(&mut self, output: PwmOutput, duty: u16) {
        match output {
            PwmOutput::Power => self.power_duty = duty,
        }
        self.log(HalWrite::Pwm {
            output,
            duty,
            at_us: self.now_us,
        });
    }

    fn micros(&self) -> u64 {
        self.now_us
    }

    fn millis(&self) -> u64 {
        self.now_us / 1_000
    }
}
