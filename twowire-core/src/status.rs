//! TWI status codes
//!
//! After every triggered operation the peripheral reports which protocol
//! phase completed in the upper five bits of the status register. The
//! lower bits hold the prescaler setting and are masked off.

/// Mask selecting the status code bits of the status register
pub const STATUS_MASK: u8 = 0xF8;

/// Decoded master-mode status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Illegal START/STOP detected (0x00)
    BusError,
    /// START transmitted (0x08)
    Start,
    /// Repeated START transmitted (0x10)
    RepeatedStart,
    /// SLA+W transmitted, ACK received (0x18)
    AddressWriteAck,
    /// SLA+W transmitted, NACK received (0x20)
    AddressWriteNack,
    /// Data transmitted, ACK received (0x28)
    DataWriteAck,
    /// Data transmitted, NACK received (0x30)
    DataWriteNack,
    /// Arbitration lost in SLA+R/W or data (0x38)
    ArbitrationLost,
    /// SLA+R transmitted, ACK received (0x40)
    AddressReadAck,
    /// SLA+R transmitted, NACK received (0x48)
    AddressReadNack,
    /// Data received, ACK returned (0x50)
    DataReadAck,
    /// Data received, NACK returned (0x58)
    DataReadNack,
    /// No relevant state information, ready flag not set (0xF8)
    NoInfo,
    /// Any other code (slave-mode states, unexpected values)
    Other(u8),
}

impl Status {
    /// Decode a raw status register value
    pub const fn from_register(raw: u8) -> Self {
        match raw & STATUS_MASK {
            0x00 => Status::BusError,
            0x08 => Status::Start,
            0x10 => Status::RepeatedStart,
            0x18 => Status::AddressWriteAck,
            0x20 => Status::AddressWriteNack,
            0x28 => Status::DataWriteAck,
            0x30 => Status::DataWriteNack,
            0x38 => Status::ArbitrationLost,
            0x40 => Status::AddressReadAck,
            0x48 => Status::AddressReadNack,
            0x50 => Status::DataReadAck,
            0x58 => Status::DataReadNack,
            0xF8 => Status::NoInfo,
            other => Status::Other(other),
        }
    }

    /// Status code as it appears in the register
    pub const fn code(self) -> u8 {
        match self {
            Status::BusError => 0x00,
            Status::Start => 0x08,
            Status::RepeatedStart => 0x10,
            Status::AddressWriteAck => 0x18,
            Status::AddressWriteNack => 0x20,
            Status::DataWriteAck => 0x28,
            Status::DataWriteNack => 0x30,
            Status::ArbitrationLost => 0x38,
            Status::AddressReadAck => 0x40,
            Status::AddressReadNack => 0x48,
            Status::DataReadAck => 0x50,
            Status::DataReadNack => 0x58,
            Status::NoInfo => 0xF8,
            Status::Other(code) => code,
        }
    }

    /// Check if a byte transfer was acknowledged
    ///
    /// True exactly for SLA+W ACK, data-write ACK, SLA+R ACK and
    /// data-read ACK. Everything else, NACKs and bus faults included, is a
    /// failed transfer.
    pub const fn is_transfer_ack(self) -> bool {
        matches!(
            self,
            Status::AddressWriteAck
                | Status::DataWriteAck
                | Status::AddressReadAck
                | Status::DataReadAck
        )
    }

    /// Check if a (repeated) START was transmitted
    pub const fn is_start(self) -> bool {
        matches!(self, Status::Start | Status::RepeatedStart)
    }
}

impl From<u8> for Status {
    fn from(raw: u8) -> Self {
        Self::from_register(raw)
    }
}
