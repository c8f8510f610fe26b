//! RT-Safe Signal Filters for the DC Motor Control Loop
//!
//! The control loop smooths two signals independently: the measured motor
//! current and the commanded power coming out of the PID stage. Both use the
//! same single-pole low-pass filter, evaluated at a variable sample interval
//! taken from the monotonic microsecond clock.
//!
//! # RT Safety Guarantees
//!
//! - No heap allocations
//! - O(1) time complexity for all operations
//! - No syscalls or I/O
//! - State types are `#[repr(C)]` and `Copy`
//!
//! # Example
//!
//! ```
//! use dcmotor_filters::prelude::*;
//!
//! // Seeded at construction: no start-up transient.
//! let mut filter = LowPassFilter::initialized(2.5, 0.0, 0);
//!
//! // 10 ms later a step arrives; the output moves part of the way.
//! let out = filter.step(1.0, 10_000);
//! assert!(out > 0.0 && out < 1.0);
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod lowpass;
pub mod prelude;

pub use lowpass::LowPassFilter;
