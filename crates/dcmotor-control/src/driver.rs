//! H-bridge output stage.
//!
//! Turns a signed power command into two direction pin levels and a PWM
//! magnitude. The sign is consumed by the direction stage only; the
//! magnitude written to the PWM output is always within `[0, max_pwm]`.

use dcmotor_hal::{DigitalOutput, Level, MotorHal, PwmOutput};

/// Wiring polarity of the motor leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    /// Forward asserts `Direction1`
    #[default]
    Normal,
    /// Forward asserts `Direction2`, for reversed wiring
    Inverted,
}

/// Direction the bridge was set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeState {
    /// Positive power
    Forward,
    /// Negative power
    Reverse,
    /// Zero power, both direction outputs low (not braking)
    Coast,
}

/// Signed power and the wiring it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveCommand {
    /// Signed power before clamping
    pub power: i32,
    /// Lead polarity
    pub polarity: Polarity,
}

impl DriveCommand {
    /// Command with the given power and polarity.
    pub const fn new(power: i32, polarity: Polarity) -> Self {
        Self { power, polarity }
    }

    /// Bridge state implied by the sign of the power.
    pub const fn bridge_state(&self) -> BridgeState {
        match self.power.signum() {
            1 => BridgeState::Forward,
            -1 => BridgeState::Reverse,
            _ => BridgeState::Coast,
        }
    }

    /// `(Direction1, Direction2)` levels for this command.
    pub const fn direction_levels(&self) -> (Level, Level) {
        match (self.bridge_state(), self.polarity) {
            (BridgeState::Coast, _) => (Level::Low, Level::Low),
            (BridgeState::Forward, Polarity::Normal) | (BridgeState::Reverse, Polarity::Inverted) => {
                (Level::High, Level::Low)
            }
            (BridgeState::Reverse, Polarity::Normal) | (BridgeState::Forward, Polarity::Inverted) => {
                (Level::Low, Level::High)
            }
        }
    }

    /// PWM magnitude after clamping to `max_pwm`, and whether it was clamped.
    pub fn duty(&self, max_pwm: u16) -> (u16, bool) {
        let magnitude = self.power.unsigned_abs();
        match u16::try_from(magnitude) {
            Ok(duty) if duty <= max_pwm => (duty, false),
            _ => (max_pwm, true),
        }
    }
}

/// What was written to the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveOutput {
    /// Bridge state selected by the power sign
    pub state: BridgeState,
    /// Level written to `Direction1`
    pub direction1: Level,
    /// Level written to `Direction2`
    pub direction2: Level,
    /// Magnitude written to the PWM output
    pub duty: u16,
    /// The magnitude was clamped to `max_pwm`
    pub saturated: bool,
}

/// Stateless output stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotorDriver;

impl MotorDriver {
    /// Write direction pins, then the PWM duty.
    ///
    /// # Example
    ///
    /// ```
    /// use dcmotor_control::driver::{BridgeState, DriveCommand, MotorDriver, Polarity};
    /// use dcmotor_hal::prelude::*;
    ///
    /// let mut hal = SimulatedHal::new();
    /// let out = MotorDriver::drive(&mut hal, DriveCommand::new(-300, Polarity::Normal), 255);
    ///
    /// assert_eq!(out.state, BridgeState::Reverse);
    /// assert_eq!(hal.direction_pins(), (Level::Low, Level::High));
    /// assert_eq!(hal.pwm_duty(PwmOutput::Power), 255);
    /// assert!(out.saturated);
    /// ```
    pub fn drive<H: MotorHal>(hal: &mut H, command: DriveCommand, max_pwm: u16) -> DriveOutput {
        let (direction1, direction2) = command.direction_levels();
        let (duty, saturated) = command.duty(max_pwm);

        hal.write_digital(DigitalOutput::Direction1, direction1);
        hal.write_digital(DigitalOutput::Direction2, direction2);
        hal.write_pwm(PwmOutput::Power, duty);

        DriveOutput {
            state: command.bridge_state(),
            direction1,
            direction2,
            duty,
            saturated,
        }
    }
}
