//! Board-agnostic TWI (I2C) bus controller
//!
//! This crate contains the bus protocol logic that does not depend on a
//! specific chip:
//!
//! - START/STOP framing and address/direction bytes
//! - Per-byte ACK/NACK handling and status-code interpretation
//! - Byte and buffer transactions with a guaranteed closing STOP
//! - Clock divisor calculation and validation
//! - Pluggable ready-flag wait strategies (spin, bounded, timed)
//!
//! The register block is reached only through
//! [`twowire_hal::TwiRegisters`], so everything here runs on the host
//! against a simulated peripheral.
//!
//! # Example
//!
//! ```ignore
//! use twowire_core::{Address, BusConfig, Twi, wait::Spin};
//!
//! let mut twi = Twi::new(regs, BusConfig::standard(16_000_000), Spin)?;
//! let eeprom = Address::from_const(0x50);
//! twi.write_buffer(eeprom, &[0x00, 0x10, b'h', b'i'])?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod address;
pub mod bus;
pub mod config;
pub mod error;
pub mod status;
pub mod wait;

#[cfg(test)]
mod mock;

pub use address::{Address, InvalidAddress};
pub use bus::{Phase, Transaction, Twi};
pub use config::{BusConfig, ConfigError, ReadMode};
pub use error::{Error, NackSource};
pub use status::Status;
pub use twowire_hal::{Direction, I2cBus, TwiRegisters};
