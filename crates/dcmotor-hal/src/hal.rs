//! The hardware abstraction trait.

use crate::pins::{AnalogInput, DigitalInput, DigitalOutput, Level, PwmOutput};

/// Board-level I/O needed by one motor channel.
///
/// Methods that only observe hardware (`read_digital`, `micros`, `millis`)
/// take `&self` so they can be called from encoder interrupt handlers while
/// the update cycle owns the controller.
///
/// # Real-Time Safety
///
/// Implementations must not allocate or block. Every method is called at
/// least once per update cycle, and `read_digital`/`micros` once per encoder
/// edge.
///
/// # Clocks
///
/// Both clocks are monotonic and free-running. `millis` is expected to track
/// `micros / 1000`; the controller uses `micros` for filtering and encoder
/// timing and `millis` for the stall timeout only.
pub trait MotorHal {
    /// Drive a direction output.
    fn write_digital(&mut self, output: DigitalOutput, level: Level);

    /// Sample an encoder input.
    fn read_digital(&self, input: DigitalInput) -> Level;

    /// Sample an analog input. Raw converter units.
    fn read_analog(&mut self, input: AnalogInput) -> u16;

    /// Set a PWM duty. `0` is off; full scale is board-defined.
    fn write_pwm(&mut self, output: PwmOutput, duty: u16);

    /// Microseconds since an arbitrary epoch.
    fn micros(&self) -> u64;

    /// Milliseconds since the same epoch as [`MotorHal::micros`].
    fn millis(&self) -> u64;
}

impl<H: MotorHal + ?Sized> MotorHal for &mut H {
    #[inline]
    fn write_digital(&mut self, output: DigitalOutput, level: Level) {
        (**self).write_digital(output, level);
    }

    #[inline]
    fn read_digital(&self, input: DigitalInput) -> Level {
        (**self).read_digital(input)
    }

    #[inline]
    fn read_analog(&mut self, input: AnalogInput) -> u16 {
        (**self).read_analog(input)
    }

    #[inline]
    fn write_pwm(&mut self, output: PwmOutput, duty: u16) {
        (**self).write_pwm(output, duty);
    }

    #[inline]
    fn micros(&self) -> u64 {
        (**self).micros()
    }

    #[inline]
    fn millis(&self) -> u64 {
        (**self).millis()
    }
}
