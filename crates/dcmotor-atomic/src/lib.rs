//! # dcmotor-atomic
//!
//! Lock-free diagnostic counters for the DC motor control loop.
//!
//! The control path never fails. Instead, every time a numeric policy kicks
//! in (a PWM duty saturates, the integrator hits its windup bound, a sensor
//! reading is clamped, the clock misbehaves) the loop records a
//! [`ClampEvent`] here. Counters can be read from any context without
//! blocking the loop.
//!
//! ## Usage
//!
//! ```rust
//! use dcmotor_atomic::{ClampCounters, ClampEvent};
//!
//! let counters = ClampCounters::new();
//!
//! // Control loop side
//! counters.inc_cycle();
//! counters.record(ClampEvent::PwmSaturated);
//!
//! // Diagnostics side
//! let snapshot = counters.snapshot();
//! assert_eq!(snapshot.cycles, 1);
//! assert_eq!(snapshot.pwm_saturations, 1);
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

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod counters;
pub mod prelude;

pub use counters::{ClampCounters, ClampEvent, ClampSnapshot};
