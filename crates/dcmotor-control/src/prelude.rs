//! Prelude for convenient imports.
//!
//! ```rust
//! use dcmotor_control::prelude::*;
//!
//! let config = MotorConfig::new(255);
//! assert!(config.is_ok());
//! ```

pub use crate::config::{ModeSwitchPolicy, MotorConfig, MotorConfigBuilder};
pub use crate::controller::{ControlMode, CycleReport, DcMotorController};
pub use crate::driver::{BridgeState, DriveCommand, DriveOutput, MotorDriver, Polarity};
pub use crate::encoder::{Direction, EncoderState, QuadratureEncoder};
pub use crate::pid::{PidController, PidGains, PidOutput};
pub use crate::velocity::{VelocityEstimator, VelocityUpdate};

pub use dcmotor_atomic::{ClampCounters, ClampEvent, ClampSnapshot};
pub use dcmotor_errors::{ConfigError, MotorError, MotorResult};
