//! Bus error types

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use crate::address::InvalidAddress;
use crate::status::Status;
use crate::wait::TimedOut;

/// Which byte of a transaction went unacknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NackSource {
    /// The address byte (no device answered)
    Address,
    /// A data byte
    Data,
}

/// Errors from bus operations
///
/// Every composed operation that fails has already issued a STOP, so the
/// bus is released when one of these reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Byte was not acknowledged
    Nack(NackSource),
    /// Another master won arbitration
    ArbitrationLost,
    /// Illegal START/STOP condition on the bus
    BusError,
    /// Peripheral reported a status that does not fit the current phase
    UnexpectedStatus(Status),
    /// Ready flag never came up within the wait budget
    Timeout,
    /// Address does not fit in seven bits
    InvalidAddress(u8),
    /// Requested length exceeds the destination capacity
    Capacity,
    /// Data transfer does not match the addressed direction
    WrongDirection,
}

impl Error {
    /// Classify a failed transfer status
    pub const fn from_status(status: Status) -> Self {
        match status {
            Status::AddressWriteNack | Status::AddressReadNack => Error::Nack(NackSource::Address),
            Status::DataWriteNack => Error::Nack(NackSource::Data),
            Status::ArbitrationLost => Error::ArbitrationLost,
            Status::BusError => Error::BusError,
            other => Error::UnexpectedStatus(other),
        }
    }

    /// Check if the target did not acknowledge its address
    pub const fn is_address_nack(&self) -> bool {
        matches!(self, Error::Nack(NackSource::Address))
    }
}

impl From<TimedOut> for Error {
    fn from(_: TimedOut) -> Self {
        Error::Timeout
    }
}

impl From<InvalidAddress> for Error {
    fn from(e: InvalidAddress) -> Self {
        Error::InvalidAddress(e.0)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Nack(NackSource::Address) => write!(f, "address not acknowledged"),
            Error::Nack(NackSource::Data) => write!(f, "data not acknowledged"),
            Error::ArbitrationLost => write!(f, "arbitration lost"),
            Error::BusError => write!(f, "bus error"),
            Error::UnexpectedStatus(status) => write!(f, "unexpected status {:#04x}", status.code()),
            Error::Timeout => write!(f, "timed out waiting for bus"),
            Error::InvalidAddress(addr) => write!(f, "invalid 7-bit address {addr:#04x}"),
            Error::Capacity => write!(f, "buffer capacity exceeded"),
            Error::WrongDirection => write!(f, "transfer does not match addressed direction"),
        }
    }
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::Nack(NackSource::Address) => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            }
            Error::Nack(NackSource::Data) => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
            Error::ArbitrationLost => ErrorKind::ArbitrationLoss,
            Error::BusError => ErrorKind::Bus,
            _ => ErrorKind::Other,
        }
    }
}
