//! Prelude for convenient imports.

pub use crate::hal::MotorHal;
pub use crate::pins::{AnalogInput, DigitalInput, DigitalOutput, Level, PwmOutput};

#[cfg(feature = "std")]
pub use crate::simulated::{HalWrite, SimulatedHal};
