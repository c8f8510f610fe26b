//! Prelude for the filters crate.
//!
//! ```
//! use dcmotor_filters::prelude::*;
//!
//! let mut filter = LowPassFilter::new(20.0);
//! assert!((filter.step(3.0, 1_000) - 3.0).abs() < 1e-6);
//! ```

pub use crate::lowpass::LowPassFilter;
