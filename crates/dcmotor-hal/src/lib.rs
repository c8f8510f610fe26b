//! # dcmotor-hal
//!
//! The hardware surface the DC motor controller needs, and nothing more:
//! two direction outputs, one PWM output, two encoder inputs, one current
//! sense ADC channel, and monotonic microsecond and millisecond clocks.
//!
//! - [`MotorHal`] is implemented once per board.
//! - [`SimulatedHal`] implements it in software for tests and host
//!   simulation (requires the `std` feature).
//!
//! ## Example
//!
//! ```rust
//! use dcmotor_hal::prelude::*;
//!
//! let mut hal = SimulatedHal::new();
//! hal.set_analog(AnalogInput::CurrentSense, 23);
//! hal.advance_ms(5);
//!
//! hal.write_digital(DigitalOutput::Direction1, Level::High);
//! hal.write_pwm(PwmOutput::Power, 128);
//!
//! assert_eq!(hal.read_analog(AnalogInput::CurrentSense), 23);
//! assert_eq!(hal.millis(), 5);
//! assert_eq!(hal.pwm_duty(PwmOutput::Power), 128);
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

pub mod hal;
pub mod pins;
pub mod prelude;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod simulated;

pub use hal::MotorHal;
pub use pins::{AnalogInput, DigitalInput, DigitalOutput, Level, PwmOutput};

#[cfg(feature = "std")]
pub use simulated::{DEFAULT_WRITE_LOG_LIMIT, HalWrite, SimulatedHal};
