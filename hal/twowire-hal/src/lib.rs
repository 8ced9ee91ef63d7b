//! twowire Hardware Abstraction Layer
//!
//! This crate defines the narrow register interface the TWI bus controller
//! is written against. Chip-specific crates implement it over the real
//! peripheral block; tests implement it over a simulated one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware / device drivers              │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twowire-core (bus controller)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twowire-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌───────────────┐
//! │ twowire-hal-  │
//! │     avr       │
//! └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`registers::TwiRegisters`] - Raw peripheral register access
//! - [`i2c::I2cBus`] - Transaction-level bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod registers;

// Re-export key traits at crate root for convenience
pub use i2c::{Direction, I2cBus};
pub use registers::{Control, TwiRegisters};
