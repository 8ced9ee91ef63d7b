//! Scoped bus transactions
//!
//! A [`Transaction`] mutably borrows the controller for its whole lifetime,
//! so only one can be open at a time. Dropping it, on success, on an early
//! `?` return, or while unwinding, issues the closing STOP.

use twowire_hal::{Direction, TwiRegisters};

use super::Twi;
use crate::address::Address;
use crate::error::Error;
use crate::wait::WaitStrategy;

/// Position of a transaction in its lifecycle
///
/// ```text
/// Idle → Started → AddressPhase → DataPhase(n) → Stopped
///                       ▲               │
///                       └─ repeated START
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Nothing sent yet
    Idle,
    /// START asserted
    Started,
    /// Address byte being sent
    AddressPhase,
    /// Address acknowledged, `n` data bytes transferred since
    DataPhase(usize),
    /// STOP issued
    Stopped,
}

impl Phase {
    /// Check if the bus is held (START sent, no STOP yet)
    pub fn holds_bus(&self) -> bool {
        !matches!(self, Phase::Idle | Phase::Stopped)
    }
}

/// Open transaction with one device
pub struct Transaction<'a, R: TwiRegisters, W: WaitStrategy> {
    twi: &'a mut Twi<R, W>,
    address: Address,
    direction: Direction,
    phase: Phase,
}

impl<'a, R: TwiRegisters, W: WaitStrategy> Transaction<'a, R, W> {
    /// Guard that has not touched the bus yet
    pub(super) fn idle(twi: &'a mut Twi<R, W>, address: Address) -> Self {
        Self {
            twi,
            address,
            direction: Direction::Write,
            phase: Phase::Idle,
        }
    }

    /// START + address byte
    pub(super) fn open(
        twi: &'a mut Twi<R, W>,
        address: Address,
        direction: Direction,
    ) -> Result<Self, Error> {
        let mut txn = Self::idle(twi, address);
        txn.begin(direction)?;
        Ok(txn)
    }

    /// Send a (repeated) START followed by the address byte
    fn begin(&mut self, direction: Direction) -> Result<(), Error> {
        // Mark the bus as held before asserting START so a failed wait
        // still ends with a STOP.
        self.phase = Phase::Started;
        let status = self.twi.send_start()?;
        if !status.is_start() {
            return Err(Error::from_status(status));
        }

        self.direction = direction;
        self.phase = Phase::AddressPhase;
        self.twi.write_byte(self.address.with_direction(direction))?;
        self.phase = Phase::DataPhase(0);
        Ok(())
    }

    /// Switch direction with a repeated START, keeping the bus
    pub fn restart(&mut self, direction: Direction) -> Result<(), Error> {
        self.begin(direction)
    }

    /// Make sure the bus is addressed in `direction`
    ///
    /// Opens the transaction if nothing was sent yet and issues a repeated
    /// START if the direction changes.
    pub(super) fn ensure(&mut self, direction: Direction) -> Result<(), Error> {
        match self.phase {
            Phase::DataPhase(_) if self.direction == direction => Ok(()),
            _ => self.begin(direction),
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Target device
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn advance(&mut self) {
        if let Phase::DataPhase(n) = self.phase {
            self.phase = Phase::DataPhase(n + 1);
        }
    }

    fn check_direction(&self, direction: Direction) -> Result<(), Error> {
        if self.direction == direction {
            Ok(())
        } else {
            Err(Error::WrongDirection)
        }
    }

    /// Transmit one data byte
    ///
    /// Fails with [`Error::WrongDirection`] without touching the bus if the
    /// device was addressed for reading.
    pub fn write(&mut self, byte: u8) -> Result<(), Error> {
        self.check_direction(Direction::Write)?;
        self.twi.write_byte(byte)?;
        self.advance();
        Ok(())
    }

    /// Transmit bytes in order, stopping at the first NACK
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        for &byte in bytes {
            self.write(byte)?;
        }
        Ok(())
    }

    /// Receive one byte, acknowledging it if more are expected
    ///
    /// Fails with [`Error::WrongDirection`] without touching the bus if the
    /// device was addressed for writing.
    pub fn read_byte(&mut self, ack: bool) -> Result<u8, Error> {
        self.check_direction(Direction::Read)?;
        let byte = if ack {
            self.twi.read_byte_ack()?
        } else {
            self.twi.read_byte_nack()?
        };
        self.advance();
        Ok(byte)
    }

    /// Fill `buf`, acknowledging every byte except the last
    pub fn read(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        self.read_run(buf, true)
    }

    /// Fill `buf`, acknowledging every byte (more reads follow)
    pub fn read_acked(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        self.read_run(buf, false)
    }

    fn read_run(&mut self, buf: &mut [u8], nack_last: bool) -> Result<(), Error> {
        let last = buf.len().saturating_sub(1);
        for (i, slot) in buf.iter_mut().enumerate() {
            let ack = !(nack_last && i == last);
            *slot = self.read_byte(ack)?;
        }
        Ok(())
    }

    /// Issue the STOP and end the transaction
    pub fn stop(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.phase.holds_bus() {
            self.twi.send_stop();
            self.phase = Phase::Stopped;
        }
    }
}

impl<R: TwiRegisters, W: WaitStrategy> Drop for Transaction<'_, R, W> {
    fn drop(&mut self) {
        self.finish();
    }
}
