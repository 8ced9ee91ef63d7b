//! TWI peripheral register interface
//!
//! The TWI block is driven through five registers:
//!
//! | Register    | Use                                                  |
//! |-------------|------------------------------------------------------|
//! | bit rate    | clock divisor, written once at init                  |
//! | status      | upper five bits: status code; lower two: prescaler   |
//! | control     | enable/start/stop/ack bits and the ready flag        |
//! | data        | byte to transmit or byte received                    |
//! | own address | 7-bit address (shifted left) + general call bit      |

use core::ops::{BitOr, BitOrAssign};

/// Control register bit set
///
/// Writing [`Control::INT`] clears the hardware ready flag and starts the
/// operation selected by the other bits. The hardware sets the flag again
/// when the operation has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Control(u8);

impl Control {
    /// No bits set
    pub const NONE: Self = Self(0);
    /// Interrupt / ready flag (TWINT)
    pub const INT: Self = Self(1 << 7);
    /// Enable acknowledge (TWEA)
    pub const ACK: Self = Self(1 << 6);
    /// Start condition (TWSTA)
    pub const START: Self = Self(1 << 5);
    /// Stop condition (TWSTO)
    pub const STOP: Self = Self(1 << 4);
    /// Peripheral enable (TWEN)
    pub const ENABLE: Self = Self(1 << 2);

    /// Build from a raw register value
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw register value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if every bit in `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Combine two bit sets (usable in const context)
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if the hardware has finished the current operation
    pub const fn is_ready(self) -> bool {
        self.contains(Self::INT)
    }
}

impl BitOr for Control {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Control {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Own-address register bit enabling general call (address 0) recognition
pub const GENERAL_CALL_ENABLE: u8 = 1 << 0;

/// Raw TWI register access
///
/// Implementations perform single volatile reads/writes and nothing else.
/// All protocol sequencing (waiting on the ready flag, status decoding,
/// START/STOP framing) lives in the bus controller.
///
/// Reads take `&mut self` because polling real hardware is a side-effecting
/// operation and simulated peripherals advance state on read.
pub trait TwiRegisters {
    /// Write the bit rate (clock divisor) register
    fn write_bit_rate(&mut self, divisor: u8);

    /// Write the prescaler bits of the status register (0 = /1)
    fn write_prescaler(&mut self, prescaler: u8);

    /// Write the control register
    fn write_control(&mut self, control: Control);

    /// Read the control register
    fn read_control(&mut self) -> Control;

    /// Read the raw status register, prescaler bits included
    fn read_status(&mut self) -> u8;

    /// Load the data register
    fn write_data(&mut self, byte: u8);

    /// Read the data register
    fn read_data(&mut self) -> u8;

    /// Write the own (slave) address register
    fn write_own_address(&mut self, value: u8);
}
