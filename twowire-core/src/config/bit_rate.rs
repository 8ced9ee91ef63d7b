//! Bit-rate divisor calculation
//!
//! With the prescaler fixed at 1 the peripheral generates
//!
//! ```text
//! SCL = F_CPU / (16 + 2 * TWBR)
//! ```
//!
//! so `TWBR = (F_CPU / SCL - 16) / 2`. Integer division truncates, which
//! rounds the divisor down and the resulting SCL frequency up by at most
//! one step.

/// Smallest usable `F_CPU / SCL` ratio (TWBR = 0)
pub const MIN_CLOCK_RATIO: u32 = 16;

/// Clock settings that cannot be programmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Bus frequency of zero
    ZeroFrequency,
    /// Core clock too slow for the requested bus frequency
    BusTooFast {
        /// Achieved `F_CPU / SCL` ratio (must be at least 16)
        ratio: u32,
    },
    /// Divisor does not fit the 8-bit bit-rate register
    BusTooSlow {
        /// Computed divisor
        divisor: u32,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroFrequency => write!(f, "bus frequency is zero"),
            ConfigError::BusTooFast { ratio } => {
                write!(f, "core clock only {ratio}x bus clock, need {MIN_CLOCK_RATIO}x")
            }
            ConfigError::BusTooSlow { divisor } => {
                write!(f, "divisor {divisor} exceeds bit-rate register")
            }
        }
    }
}

/// Compute the bit-rate register value for a prescaler of 1
///
/// # Arguments
/// * `core_clock_hz` - CPU clock in Hz
/// * `bus_frequency_khz` - Desired SCL frequency in kHz
///
/// # Example
/// ```
/// use twowire_core::config::divisor;
/// // 8 MHz core, 100 kHz bus
/// assert_eq!(divisor(8_000_000, 100), Ok(32));
/// ```
pub fn divisor(core_clock_hz: u32, bus_frequency_khz: u16) -> Result<u8, ConfigError> {
    if bus_frequency_khz == 0 {
        return Err(ConfigError::ZeroFrequency);
    }

    let bus_hz = u32::from(bus_frequency_khz) * 1000;
    let ratio = core_clock_hz / bus_hz;
    if ratio < MIN_CLOCK_RATIO {
        return Err(ConfigError::BusTooFast { ratio });
    }

    let divisor = (ratio - MIN_CLOCK_RATIO) / 2;
    u8::try_from(divisor).map_err(|_| ConfigError::BusTooSlow { divisor })
}

/// SCL frequency produced by a divisor
pub const fn scl_frequency_hz(core_clock_hz: u32, divisor: u8) -> u32 {
    core_clock_hz / (MIN_CLOCK_RATIO + 2 * divisor as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_8mhz_100khz() {
        assert_eq!(divisor(8_000_000, 100), Ok(32));
        assert_eq!(scl_frequency_hz(8_000_000, 32), 100_000);
    }

    #[test]
    fn test_ratio_exactly_16() {
        assert_eq!(divisor(1_600_000, 100), Ok(0));
    }

    #[test]
    fn test_zero_frequency() {
        assert_eq!(divisor(8_000_000, 0), Err(ConfigError::ZeroFrequency));
    }

    #[test]
    fn test_too_fast() {
        assert_eq!(
            divisor(8_000_000, 1000),
            Err(ConfigError::BusTooFast { ratio: 8 })
        );
    }

    #[test]
    fn test_too_slow() {
        // 20 MHz / 10 kHz = 2000 -> (2000 - 16) / 2 = 992
        assert_eq!(
            divisor(20_000_000, 10),
            Err(ConfigError::BusTooSlow { divisor: 992 })
        );
    }

    #[test]
    fn test_odd_ratio_truncates() {
        // 8 MHz / 150 kHz = 53 -> (53 - 16) / 2 = 18
        assert_eq!(divisor(8_000_000, 150), Ok(18));
    }

    proptest! {
        #[test]
        fn prop_divisor_matches_formula(
            core_clock_hz in 1_000_000u32..=32_000_000,
            bus_frequency_khz in 1u16..=1000,
        ) {
            let ratio = core_clock_hz / (u32::from(bus_frequency_khz) * 1000);
            prop_assume!(ratio >= MIN_CLOCK_RATIO);

            let expected = (ratio - MIN_CLOCK_RATIO) / 2;
            match divisor(core_clock_hz, bus_frequency_khz) {
                Ok(d) => prop_assert_eq!(u32::from(d), expected),
                Err(e) => {
                    prop_assert!(expected > u32::from(u8::MAX));
                    prop_assert_eq!(e, ConfigError::BusTooSlow { divisor: expected });
                }
            }
        }

        #[test]
        fn prop_scl_never_below_request(
            core_clock_hz in 1_000_000u32..=32_000_000,
            bus_frequency_khz in 1u16..=1000,
        ) {
            if let Ok(d) = divisor(core_clock_hz, bus_frequency_khz) {
                let requested = u32::from(bus_frequency_khz) * 1000;
                prop_assert!(scl_frequency_hz(core_clock_hz, d) >= requested);
            }
        }
    }
}
