//! I2C bus abstractions
//!
//! Transaction-level operations that device drivers are written against.
//! Every operation is a complete bus transaction: it starts with a START
//! condition and always ends with a STOP, whether it succeeds or not.

/// Transfer direction encoded in the R/W bit of the address byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    /// Master transmits (R/W = 0)
    Write = 0,
    /// Master receives (R/W = 1)
    Read = 1,
}

impl Direction {
    /// Value of the R/W bit
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// I2C bus master
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// The last byte is not acknowledged so the device releases the bus.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Check whether a device acknowledges its address
    ///
    /// Sends the address with the write bit and no data.
    fn probe(&mut self, address: u8) -> Result<bool, Self::Error>;
}
