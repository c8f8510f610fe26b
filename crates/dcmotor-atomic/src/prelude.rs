//! Prelude for convenient imports.
//!
//! ```rust
//! use dcmotor_atomic::prelude::*;
//!
//! let counters = ClampCounters::new();
//! counters.record(ClampEvent::StallDetected);
//! ```

pub use crate::counters::{ClampCounters, ClampEvent, ClampSnapshot};
