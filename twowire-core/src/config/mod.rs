//! Bus configuration
//!
//! Clock and read-mode settings supplied at initialization, and the
//! bit-rate divisor calculation that turns them into register values.

pub mod bit_rate;
pub mod types;

pub use bit_rate::{divisor, scl_frequency_hz, ConfigError, MIN_CLOCK_RATIO};
pub use types::*;
