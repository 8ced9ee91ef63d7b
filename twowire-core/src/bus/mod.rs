//! TWI bus controller
//!
//! [`Twi`] owns the peripheral register block and is the only way to drive
//! the bus. It provides three layers:
//!
//! - Primitive signaling: [`Twi::send_start`], [`Twi::send_stop`],
//!   [`Twi::write_byte`], [`Twi::read_byte_ack`], [`Twi::read_byte_nack`]
//! - Scoped transactions: [`Twi::transaction`] returns a [`Transaction`]
//!   guard that always ends with a STOP
//! - Composed operations: byte and buffer transfers built on transactions
//!
//! All operations block on the hardware ready flag through the configured
//! [`WaitStrategy`].

mod hal;
mod ops;
mod transaction;

pub use transaction::{Phase, Transaction};

use twowire_hal::{registers::GENERAL_CALL_ENABLE, Control, Direction, TwiRegisters};

use crate::address::Address;
use crate::config::{BusConfig, ConfigError, ReadMode};
use crate::error::Error;
use crate::status::Status;
use crate::wait::{Spin, WaitStrategy};

/// Blocking TWI master
///
/// There is one TWI block per chip, so there is one `Twi` per program.
/// It is created once at startup and lives for the rest of the program.
pub struct Twi<R, W = Spin> {
    regs: R,
    wait: W,
    divisor: u8,
    enabled: bool,
    read_mode: ReadMode,
    own_address: Option<Address>,
}

impl<R: TwiRegisters, W: WaitStrategy> Twi<R, W> {
    /// Program the clock divisor and enable the peripheral
    ///
    /// The prescaler is fixed at 1. The configuration is validated before
    /// any register is touched, so a rejected config leaves the peripheral
    /// as it was.
    pub fn new(mut regs: R, config: BusConfig, wait: W) -> Result<Self, ConfigError> {
        let divisor = config.bit_rate()?;

        regs.write_prescaler(0);
        regs.write_bit_rate(divisor);
        regs.write_control(Control::ENABLE);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "TWI enabled: {} Hz core, {} kHz bus, TWBR={}",
            config.core_clock_hz,
            config.bus_frequency_khz,
            divisor
        );

        Ok(Self {
            regs,
            wait,
            divisor,
            enabled: true,
            read_mode: config.read_mode,
            own_address: None,
        })
    }

    /// Programmed bit-rate divisor
    pub fn divisor(&self) -> u8 {
        self.divisor
    }

    /// Check if the peripheral is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current read mode
    pub fn read_mode(&self) -> ReadMode {
        self.read_mode
    }

    /// Change how buffer reads treat the final byte
    pub fn set_read_mode(&mut self, read_mode: ReadMode) {
        self.read_mode = read_mode;
    }

    /// Registered own (slave) address, if any
    pub fn own_address(&self) -> Option<Address> {
        self.own_address
    }

    /// Access the wait strategy
    pub fn wait_strategy_mut(&mut self) -> &mut W {
        &mut self.wait
    }

    /// Tear down the controller and return the register block
    pub fn release(self) -> R {
        self.regs
    }

    /// Answer as a peripheral target at `address`
    ///
    /// Programs the own-address register and enables the peripheral with
    /// acknowledge on. With `general_call` set the controller also answers
    /// address 0. Slave data handling is left to the application.
    pub fn register_own_address(&mut self, address: Address, general_call: bool) {
        let mut value = address.get() << 1;
        if general_call {
            value |= GENERAL_CALL_ENABLE;
        }
        self.regs.write_own_address(value);
        self.regs.write_control(Control::ENABLE | Control::ACK);
        self.own_address = Some(address);
        self.enabled = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("TWI own address {=u8:#x}", address.get());
    }

    /// Current decoded status
    pub fn status(&mut self) -> Status {
        Status::from_register(self.regs.read_status())
    }

    /// Bits kept set in control writes while idle
    ///
    /// Keeps acknowledge on once an own address is registered so the
    /// controller stays addressable between master transactions.
    fn idle_bits(&self) -> Control {
        if self.own_address.is_some() {
            Control::ENABLE | Control::ACK
        } else {
            Control::ENABLE
        }
    }

    /// Start an operation and block until the ready flag is set
    fn trigger(&mut self, bits: Control) -> Result<(), Error> {
        self.regs.write_control(Control::INT | Control::ENABLE | bits);
        let regs = &mut self.regs;
        let result = self.wait.wait(|| regs.read_control().is_ready());

        #[cfg(feature = "defmt")]
        if result.is_err() {
            defmt::warn!("TWI timed out waiting for ready flag");
        }

        result.map_err(Error::from)
    }

    /// Assert a (repeated) START and wait for it to complete
    ///
    /// Returns the resulting status without judging it; callers decide
    /// whether the START succeeded.
    pub fn send_start(&mut self) -> Result<Status, Error> {
        self.trigger(Control::START)?;
        let status = self.status();

        #[cfg(feature = "defmt")]
        defmt::trace!("TWI START -> {}", status);

        Ok(status)
    }

    /// Assert a STOP
    ///
    /// Does not wait: the hardware sets no ready flag after a STOP.
    pub fn send_stop(&mut self) {
        let bits = Control::INT | Control::STOP | self.idle_bits();
        self.regs.write_control(bits);

        #[cfg(feature = "defmt")]
        defmt::trace!("TWI STOP");
    }

    /// Transmit one byte and check that it was acknowledged
    ///
    /// Succeeds only for status SLA+W ACK, data-write ACK, SLA+R ACK or
    /// data-read ACK. Any other status is turned into an [`Error`] that
    /// keeps the reason (NACK, arbitration lost, bus error, ...).
    pub fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.regs.write_data(byte);
        self.trigger(Control::NONE)?;

        let status = self.status();

        #[cfg(feature = "defmt")]
        defmt::trace!("TWI write {=u8:#x} -> {}", byte, status);

        if status.is_transfer_ack() {
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("TWI write {=u8:#x} failed: {}", byte, status);

            Err(Error::from_status(status))
        }
    }

    /// Receive one byte and acknowledge it (more bytes expected)
    ///
    /// The status is not checked.
    pub fn read_byte_ack(&mut self) -> Result<u8, Error> {
        self.trigger(Control::ACK)?;
        let byte = self.regs.read_data();

        #[cfg(feature = "defmt")]
        defmt::trace!("TWI read {=u8:#x} (ACK)", byte);

        Ok(byte)
    }

    /// Receive one byte without acknowledging it (last byte)
    ///
    /// The status is not checked.
    pub fn read_byte_nack(&mut self) -> Result<u8, Error> {
        self.trigger(Control::NONE)?;
        let byte = self.regs.read_data();

        #[cfg(feature = "defmt")]
        defmt::trace!("TWI read {=u8:#x} (NACK)", byte);

        Ok(byte)
    }

    /// Open a transaction with `address`
    ///
    /// Sends START and the address byte. The returned guard issues a STOP
    /// when it is finished or dropped; if opening fails the STOP has
    /// already been sent.
    pub fn transaction(
        &mut self,
        address: Address,
        direction: Direction,
    ) -> Result<Transaction<'_, R, W>, Error> {
        Transaction::open(self, address, direction)
    }
}
