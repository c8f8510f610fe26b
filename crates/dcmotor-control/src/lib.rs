//! # dcmotor-control
//!
//! Closed-loop control for a brushed DC motor with a quadrature encoder and
//! an H-bridge.
//!
//! ## Architecture
//!
//! - [`encoder`]: interrupt-written position, direction and edge timestamps
//! - [`velocity`]: period-based velocity with stall timeout and ceiling
//! - [`pid`]: PID law with separate velocity and position windup bounds
//! - [`driver`]: signed power and polarity into direction pins and PWM
//! - [`config`]: validated motor configuration and builder
//! - [`controller`]: [`DcMotorController`], composing the above
//!
//! One update cycle:
//!
//! ```text
//! encoder snapshot ─► velocity estimate ─► PID ─► power low-pass
//!                                                     │
//!              H-bridge ◄─ driver clamp ◄─ sign clamp ◄┘
//! ```
//!
//! ## Concurrency
//!
//! The encoder handlers are the only writers of shared state. They and the
//! snapshot reader each run inside one `critical_section::with` call. On a
//! target the [`QuadratureEncoder`] lives in a `static`, interrupt handlers
//! call it directly and the controller borrows it through
//! [`DcMotorController::with_encoder`]; `update` itself never runs inside a
//! critical section. On the host the `std` feature enables
//! critical-section's mutex implementation; on a microcontroller the
//! platform crate provides one.
//!
//! ## Diagnostics
//!
//! Nothing on the control path returns an error. Clamp events are counted
//! in [`ClampCounters`](dcmotor_atomic::ClampCounters) and logged with
//! `tracing` from the update cycle, never from interrupt handlers.

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

pub mod config;
pub mod controller;
pub mod driver;
pub mod encoder;
pub mod pid;
pub mod prelude;
pub mod velocity;

pub use config::{ModeSwitchPolicy, MotorConfig, MotorConfigBuilder};
pub use controller::{ControlMode, CycleReport, DcMotorController};
pub use driver::{BridgeState, DriveCommand, DriveOutput, MotorDriver, Polarity};
pub use encoder::{Direction, EncoderState, QuadratureEncoder};
pub use pid::{PidController, PidGains, PidOutput};
pub use velocity::{VelocityEstimator, VelocityUpdate};
