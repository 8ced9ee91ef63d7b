//! Trait implementations for device drivers
//!
//! [`Twi`] implements both the workspace [`I2cBus`] trait and
//! `embedded_hal::i2c::I2c`, so ecosystem sensor and EEPROM drivers can run
//! on top of it.

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
use twowire_hal::{Direction, I2cBus, TwiRegisters};

use super::{Transaction, Twi};
use crate::address::Address;
use crate::error::Error;
use crate::wait::WaitStrategy;

impl<R: TwiRegisters, W: WaitStrategy> I2cBus for Twi<R, W> {
    type Error = Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Error> {
        self.write_buffer(Address::new(address)?, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Error> {
        self.read_buffer(Address::new(address)?, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Error> {
        Twi::write_read(self, Address::new(address)?, write_data, read_buf)
    }

    fn probe(&mut self, address: u8) -> Result<bool, Error> {
        Twi::probe(self, Address::new(address)?)
    }
}

impl<R: TwiRegisters, W: WaitStrategy> ErrorType for Twi<R, W> {
    type Error = Error;
}

impl<R: TwiRegisters, W: WaitStrategy> I2c<SevenBitAddress> for Twi<R, W> {
    /// Run `operations` as one transaction
    ///
    /// A START (or repeated START) and address byte are sent before the
    /// first operation and whenever the direction changes. Adjacent
    /// operations of the same kind share one address phase, and empty
    /// operations inside a transaction are skipped. The last byte of each
    /// run of reads is not acknowledged.
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Error> {
        let address = Address::new(address)?;
        let mut txn = Transaction::idle(self, address);

        for i in 0..operations.len() {
            let more_reads = matches!(
                operations
                    .get(i + 1..)
                    .unwrap_or(&[])
                    .iter()
                    .find(|op| !is_empty(op)),
                Some(Operation::Read(_))
            );

            match operations.get_mut(i) {
                // Nothing to clock; keep the current run going
                Some(op) if is_empty(&*op) && txn.phase().holds_bus() => {}
                Some(Operation::Write(bytes)) => {
                    txn.ensure(Direction::Write)?;
                    txn.write_all(*bytes)?;
                }
                Some(Operation::Read(buf)) => {
                    txn.ensure(Direction::Read)?;
                    if more_reads {
                        txn.read_acked(buf)?;
                    } else {
                        txn.read(buf)?;
                    }
                }
                None => {}
            }
        }

        txn.stop();
        Ok(())
    }
}

fn is_empty(op: &Operation<'_>) -> bool {
    match op {
        Operation::Write(bytes) => bytes.is_empty(),
        Operation::Read(buf) => buf.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BusConfig, ReadMode};
    use crate::error::NackSource;
    use crate::mock::{Event, MockTwi};
    use crate::wait::BoundedSpin;

    fn twi(mock: MockTwi) -> Twi<MockTwi, BoundedSpin> {
        Twi::new(mock, BusConfig::default(), BoundedSpin::new(10)).unwrap()
    }

    #[test]
    fn test_i2c_bus_rejects_wide_address() {
        let mut twi = twi(MockTwi::new());
        assert_eq!(
            I2cBus::write(&mut twi, 0x80, &[1]),
            Err(Error::InvalidAddress(0x80))
        );
        assert!(twi.release().events.is_empty());
    }

    #[test]
    fn test_i2c_bus_read_follows_read_mode() {
        let mut twi = twi(MockTwi::new().respond_with(b"ab"));
        twi.set_read_mode(ReadMode::NulTerminated);
        let mut buf = [0u8; 2];
        I2cBus::read(&mut twi, 0x10, &mut buf).unwrap();
        assert_eq!(&buf, b"a\0");
    }

    #[test]
    fn test_embedded_hal_write_read() {
        let mut twi = twi(MockTwi::new().respond_with(&[0xBE, 0xEF]));
        let mut buf = [0u8; 2];
        I2c::write_read(&mut twi, 0x10, &[0x0F], &mut buf).unwrap();
        assert_eq!(buf, [0xBE, 0xEF]);
        assert_eq!(
            twi.release().events,
            [
                Event::Start,
                Event::Write(0x20),
                Event::Write(0x0F),
                Event::Start,
                Event::Write(0x21),
                Event::ReadAck,
                Event::ReadNack,
                Event::Stop
            ]
        );
    }

    #[test]
    fn test_adjacent_operations_share_address_phase() {
        let mut twi = twi(MockTwi::new().respond_with(&[1, 2, 3]));
        let mut first = [0u8; 1];
        let mut second = [0u8; 2];
        let mut ops = [
            Operation::Write(&[0xA0]),
            Operation::Write(&[0xA1]),
            Operation::Read(&mut first),
            Operation::Read(&mut second),
        ];
        I2c::transaction(&mut twi, 0x10, &mut ops).unwrap();

        assert_eq!(first, [1]);
        assert_eq!(second, [2, 3]);
        assert_eq!(
            twi.release().events,
            [
                Event::Start,
                Event::Write(0x20),
                Event::Write(0xA0),
                Event::Write(0xA1),
                Event::Start,
                Event::Write(0x21),
                Event::ReadAck,
                Event::ReadAck,
                Event::ReadNack,
                Event::Stop
            ]
        );
    }

    #[test]
    fn test_empty_read_does_not_split_read_run() {
        let mut twi = twi(MockTwi::new().respond_with(&[7, 8]));
        let mut first = [0u8; 1];
        let mut last = [0u8; 1];
        let mut ops = [
            Operation::Read(&mut first),
            Operation::Read(&mut []),
            Operation::Read(&mut last),
        ];
        I2c::transaction(&mut twi, 0x10, &mut ops).unwrap();

        assert_eq!((first, last), ([7], [8]));
        assert_eq!(
            twi.release().events,
            [
                Event::Start,
                Event::Write(0x21),
                Event::ReadAck,
                Event::ReadNack,
                Event::Stop
            ]
        );
    }

    #[test]
    fn test_empty_write_between_reads_is_skipped() {
        let mut twi = twi(MockTwi::new().respond_with(&[7, 8]));
        let mut first = [0u8; 1];
        let mut last = [0u8; 1];
        let mut ops = [
            Operation::Read(&mut first),
            Operation::Write(&[]),
            Operation::Read(&mut last),
        ];
        I2c::transaction(&mut twi, 0x10, &mut ops).unwrap();

        assert_eq!(
            twi.release().events,
            [
                Event::Start,
                Event::Write(0x21),
                Event::ReadAck,
                Event::ReadNack,
                Event::Stop
            ]
        );
    }

    #[test]
    fn test_empty_transaction_touches_nothing() {
        let mut twi = twi(MockTwi::new());
        I2c::transaction(&mut twi, 0x10, &mut []).unwrap();
        assert!(twi.release().events.is_empty());
    }

    #[test]
    fn test_embedded_hal_nack_still_stops() {
        let mut twi = twi(MockTwi::new().nack_write(2));
        let result = I2c::write(&mut twi, 0x10, &[1, 2, 3]);
        assert_eq!(result, Err(Error::Nack(NackSource::Data)));

        let regs = twi.release();
        assert_eq!(regs.stop_count(), 1);
        assert_eq!(regs.events.last(), Some(&Event::Stop));
    }
}
