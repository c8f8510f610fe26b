//! Error types for the DC motor controller workspace.
//!
//! The control loop itself never returns errors: time anomalies, sensor noise
//! and integrator windup are handled by numeric policy inside the loop. The
//! types in this crate cover the configuration path, where a bad parameter
//! must be surfaced before the first update cycle instead of turning into
//! undefined clamping behavior at drive time.
//!
//! - [`config`]: validation errors for motor configuration
//! - [`common`]: the top-level [`MotorError`] and severity classification
//!
//! # Example
//!
//! ```
//! use dcmotor_errors::prelude::*;
//!
//! fn check_cutoff(cutoff_hz: f32) -> MotorResult<f32> {
//!     if !(cutoff_hz > 0.0) {
//!         return Err(ConfigError::out_of_range("cutoff_hz", cutoff_hz, 0.0, f32::MAX).into());
//!     }
//!     Ok(cutoff_hz)
//! }
//!
//! assert!(check_cutoff(2.5).is_ok());
//! assert!(check_cutoff(0.0).is_err());
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod common;
pub mod config;
pub mod prelude;

pub use common::{ErrorSeverity, MotorError};
pub use config::ConfigError;

/// A specialized `Result` type for motor controller setup operations.
pub type MotorResult<T> = core::result::Result<T, MotorError>;
