//! TWI register bindings for ATmega
//!
//! Thin wrapper that turns the `avr-device` TWI peripheral into a
//! [`TwiRegisters`] implementation. Every method is a single volatile
//! register access.

use twowire_hal::{Control, TwiRegisters};

/// Owned ATmega TWI peripheral
///
/// Taking the PAC peripheral by value ensures there is exactly one handle
/// to the register block.
pub struct AvrTwi<TWI> {
    twi: TWI,
}

impl<TWI> AvrTwi<TWI> {
    /// Wrap the PAC TWI peripheral
    pub fn new(twi: TWI) -> Self {
        Self { twi }
    }

    /// Give the PAC peripheral back
    pub fn free(self) -> TWI {
        self.twi
    }
}

macro_rules! impl_twi_registers {
    ($chip:ident) => {
        impl TwiRegisters for AvrTwi<avr_device::$chip::TWI> {
            #[inline(always)]
            fn write_bit_rate(&mut self, divisor: u8) {
                self.twi.twbr.write(|w| unsafe { w.bits(divisor) });
            }

            #[inline(always)]
            fn write_prescaler(&mut self, prescaler: u8) {
                // Status bits are read-only; only TWPS1:0 take the write.
                self.twi.twsr.write(|w| unsafe { w.bits(prescaler & 0x03) });
            }

            #[inline(always)]
            fn write_control(&mut self, control: Control) {
                self.twi.twcr.write(|w| unsafe { w.bits(control.bits()) });
            }

            #[inline(always)]
            fn read_control(&mut self) -> Control {
                Control::from_bits(self.twi.twcr.read().bits())
            }

            #[inline(always)]
            fn read_status(&mut self) -> u8 {
                self.twi.twsr.read().bits()
            }

            #[inline(always)]
            fn write_data(&mut self, byte: u8) {
                self.twi.twdr.write(|w| unsafe { w.bits(byte) });
            }

            #[inline(always)]
            fn read_data(&mut self) -> u8 {
                self.twi.twdr.read().bits()
            }

            #[inline(always)]
            fn write_own_address(&mut self, value: u8) {
                self.twi.twar.write(|w| unsafe { w.bits(value) });
            }
        }
    };
}

#[cfg(feature = "atmega328p")]
impl_twi_registers!(atmega328p);

#[cfg(feature = "atmega32u4")]
impl_twi_registers!(atmega32u4);

#[cfg(feature = "atmega2560")]
impl_twi_registers!(atmega2560);
