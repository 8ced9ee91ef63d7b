//! Composed byte and buffer transfers
//!
//! Each operation is one complete transaction. Every failure (address or
//! data NACK, bus fault, timeout) is returned to the caller, and the bus is
//! always released with a STOP first.

use heapless::Vec;
use twowire_hal::{Direction, TwiRegisters};

use super::Twi;
use crate::address::Address;
use crate::config::ReadMode;
use crate::error::Error;
use crate::wait::WaitStrategy;

impl<R: TwiRegisters, W: WaitStrategy> Twi<R, W> {
    /// Write a single byte to a device
    ///
    /// START → SLA+W → `data` → STOP
    pub fn write_byte_to(&mut self, address: Address, data: u8) -> Result<(), Error> {
        let mut txn = self.transaction(address, Direction::Write)?;
        txn.write(data)?;
        txn.stop();
        Ok(())
    }

    /// Read a single byte from a device
    ///
    /// START → SLA+R → read (NACK) → STOP
    pub fn read_byte_from(&mut self, address: Address) -> Result<u8, Error> {
        let mut txn = self.transaction(address, Direction::Read)?;
        let byte = txn.read_byte(false)?;
        txn.stop();
        Ok(byte)
    }

    /// Write a buffer to a device
    ///
    /// Succeeds only if the address and every byte were acknowledged.
    /// Transmission stops at the first NACK.
    pub fn write_buffer(&mut self, address: Address, bytes: &[u8]) -> Result<(), Error> {
        let mut txn = self.transaction(address, Direction::Write)?;
        txn.write_all(bytes)?;
        txn.stop();
        Ok(())
    }

    /// Write text to a device, up to the first NUL if it has one
    pub fn write_str(&mut self, address: Address, text: &str) -> Result<(), Error> {
        let bytes = text.as_bytes();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.write_buffer(address, bytes.get(..end).unwrap_or(bytes))
    }

    /// Fill `buf` from a device
    ///
    /// All bytes but the last are acknowledged; the last is not, telling
    /// the device the read is over. An empty buffer still addresses the
    /// device (START, SLA+R, STOP) without a data phase.
    ///
    /// In [`ReadMode::NulTerminated`] the last byte of `buf` is overwritten
    /// with 0 after the transfer.
    pub fn read_buffer(&mut self, address: Address, buf: &mut [u8]) -> Result<(), Error> {
        let mut txn = self.transaction(address, Direction::Read)?;
        txn.read(buf)?;
        txn.stop();

        if self.read_mode == ReadMode::NulTerminated {
            if let Some(last) = buf.last_mut() {
                *last = 0;
            }
        }
        Ok(())
    }

    /// Read `len` bytes from a device into a fixed-capacity vector
    ///
    /// Fails with [`Error::Capacity`] before touching the bus if `len`
    /// exceeds `N`.
    pub fn read_vec<const N: usize>(
        &mut self,
        address: Address,
        len: usize,
    ) -> Result<Vec<u8, N>, Error> {
        let mut data = Vec::new();
        data.resize(len, 0).map_err(|_| Error::Capacity)?;
        self.read_buffer(address, &mut data)?;
        Ok(data)
    }

    /// Write to a device, then read from it after a repeated START
    pub fn write_read(
        &mut self,
        address: Address,
        bytes: &[u8],
        buf: &mut [u8],
    ) -> Result<(), Error> {
        let mut txn = self.transaction(address, Direction::Write)?;
        txn.write_all(bytes)?;
        txn.restart(Direction::Read)?;
        txn.read(buf)?;
        txn.stop();
        Ok(())
    }

    /// Check whether a device acknowledges its address
    pub fn probe(&mut self, address: Address) -> Result<bool, Error> {
        match self.transaction(address, Direction::Write) {
            Ok(txn) => {
                txn.stop();
                Ok(true)
            }
            Err(e) if e.is_address_nack() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
