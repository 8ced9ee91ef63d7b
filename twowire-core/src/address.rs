//! 7-bit device addresses

use twowire_hal::Direction;

/// 7-bit I2C device address
///
/// On the wire the address occupies the upper seven bits of the first byte
/// of a transaction; bit 0 carries the transfer direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(u8);

/// Value does not fit in seven bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidAddress(pub u8);

impl Address {
    /// Highest valid 7-bit address
    pub const MAX: u8 = 0x7F;

    /// Create an address, rejecting values above 0x7F
    pub const fn new(address: u8) -> Result<Self, InvalidAddress> {
        if address > Self::MAX {
            Err(InvalidAddress(address))
        } else {
            Ok(Self(address))
        }
    }

    /// Create an address in const context
    ///
    /// # Panics
    /// Fails to compile in a const item (or panics at runtime) if the
    /// value does not fit in seven bits.
    pub const fn from_const(address: u8) -> Self {
        match Self::new(address) {
            Ok(address) => address,
            Err(_) => panic!("I2C address out of 7-bit range"),
        }
    }

    /// Raw 7-bit value
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Address byte for the given direction
    pub const fn with_direction(self, direction: Direction) -> u8 {
        (self.0 << 1) | direction.bit()
    }

    /// Address byte with the write bit (SLA+W)
    pub const fn write_byte(self) -> u8 {
        self.with_direction(Direction::Write)
    }

    /// Address byte with the read bit (SLA+R)
    pub const fn read_byte(self) -> u8 {
        self.with_direction(Direction::Read)
    }
}

impl TryFrom<u8> for Address {
    type Error = InvalidAddress;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for u8 {
    fn from(address: Address) -> u8 {
        address.0
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
