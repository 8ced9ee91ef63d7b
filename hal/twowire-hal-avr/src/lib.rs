//! AVR-specific HAL for the twowire driver
//!
//! This crate binds the `twowire-hal` register traits to the TWI block of
//! ATmega microcontrollers through `avr-device`. It supports:
//!
//! - ATmega328P (Uno, Nano, Pro Mini)
//! - ATmega32U4 (Leonardo, Micro)
//! - ATmega2560 (Mega)
//!
//! # Features
//!
//! - `atmega328p` / `atmega32u4` / `atmega2560` - Select the target chip
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! ```ignore
//! let dp = avr_device::atmega328p::Peripherals::take().unwrap();
//! let regs = twowire_hal_avr::AvrTwi::new(dp.TWI);
//! let twi = twowire_core::Twi::new(regs, BusConfig::default(), Spin)?;
//! ```
//!
//! The SDA/SCL pins must have pull-ups (external resistors, or the
//! port's internal pull-ups for short runs) before the bus is used.

#![no_std]

pub mod twi;

pub use twi::AvrTwi;

// Re-export shared types from twowire-hal
pub use twowire_hal::{Control, TwiRegisters};
