//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bit_rate::{self, ConfigError};

/// How buffer reads treat the final byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReadMode {
    /// Every received byte is data
    #[default]
    Binary,
    /// The final byte of the buffer is replaced with NUL after the read,
    /// so text read from a device is always terminated
    NulTerminated,
}

/// Bus controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// CPU core clock in Hz
    pub core_clock_hz: u32,
    /// Desired SCL frequency in kHz
    pub bus_frequency_khz: u16,
    /// Final-byte handling for buffer reads
    pub read_mode: ReadMode,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            core_clock_hz: 8_000_000,
            bus_frequency_khz: 100, // 100kHz standard mode
            read_mode: ReadMode::Binary,
        }
    }
}

impl BusConfig {
    /// Standard mode (100 kHz)
    pub const fn standard(core_clock_hz: u32) -> Self {
        Self {
            core_clock_hz,
            bus_frequency_khz: 100,
            read_mode: ReadMode::Binary,
        }
    }

    /// Fast mode (400 kHz)
    ///
    /// Needs a core clock of at least 6.4 MHz.
    pub const fn fast(core_clock_hz: u32) -> Self {
        Self {
            core_clock_hz,
            bus_frequency_khz: 400,
            read_mode: ReadMode::Binary,
        }
    }

    /// Set the read mode
    pub const fn with_read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    /// Validate the clocks and compute the bit-rate register value
    pub fn bit_rate(&self) -> Result<u8, ConfigError> {
        bit_rate::divisor(self.core_clock_hz, self.bus_frequency_khz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BusConfig::default();
        assert_eq!(config.bit_rate(), Ok(32));
        assert_eq!(config.read_mode, ReadMode::Binary);
    }

    #[test]
    fn test_presets() {
        assert_eq!(BusConfig::standard(16_000_000).bit_rate(), Ok(72));
        assert_eq!(BusConfig::fast(16_000_000).bit_rate(), Ok(12));
    }

    #[test]
    fn test_fast_mode_needs_fast_clock() {
        assert_eq!(
            BusConfig::fast(1_000_000).bit_rate(),
            Err(ConfigError::BusTooFast { ratio: 2 })
        );
    }

    #[test]
    fn test_with_read_mode() {
        let config = BusConfig::default().with_read_mode(ReadMode::NulTerminated);
        assert_eq!(config.read_mode, ReadMode::NulTerminated);
    }
}
