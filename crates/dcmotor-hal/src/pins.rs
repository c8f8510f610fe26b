//! Logical pins and signal levels.
//!
//! The controller never sees board pin numbers. Each board's [`MotorHal`]
//! maps these logical names onto its own pins.
//!
//! [`MotorHal`]: crate::MotorHal

use core::fmt;
use core::ops::Not;

/// Logic level of a digital signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Logic low
    #[default]
    Low,
    /// Logic high
    High,
}

impl Level {
    /// Whether the level is [`Level::High`].
    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Whether the level is [`Level::Low`].
    #[inline]
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl From<bool> for Level {
    #[inline]
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    #[inline]
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl Not for Level {
    type Output = Level;

    #[inline]
    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("LOW"),
            Level::High => f.write_str("HIGH"),
        }
    }
}

/// Digital outputs driving the H-bridge direction inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DigitalOutput {
    /// First direction input (IN1)
    Direction1,
    /// Second direction input (IN2)
    Direction2,
}

/// Digital inputs from the quadrature encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DigitalInput {
    /// Encoder channel A
    EncoderA,
    /// Encoder channel B
    EncoderB,
}

/// Analog inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalogInput {
    /// H-bridge current sense feedback
    CurrentSense,
}

/// PWM outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PwmOutput {
    /// H-bridge enable / power input
    Power,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(bool::from(Level::High));
    }

    #[test]
    fn test_level_not() {
        assert_eq!(!Level::High, Level::Low);
        assert_eq!(!Level::Low, Level::High);
    }

    #[test]
    fn test_default_level_is_low() {
        assert!(Level::default().is_low());
    }
}
