//! Ready-flag wait strategies
//!
//! Every triggered TWI operation completes asynchronously in hardware and
//! signals completion by setting the ready flag. The controller blocks on
//! that flag through a [`WaitStrategy`], which decides how long to keep
//! polling before giving up.

use embedded_hal::delay::DelayNs;

/// The ready flag did not come up within the wait budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedOut;

/// Policy for blocking on the hardware ready flag
pub trait WaitStrategy {
    /// Poll `ready` until it returns true or the budget is exhausted
    fn wait<F: FnMut() -> bool>(&mut self, ready: F) -> Result<(), TimedOut>;
}

/// Spin forever
///
/// A disconnected or wedged bus hangs the caller. This matches bare-metal
/// drivers that assume the hardware always answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin;

impl WaitStrategy for Spin {
    fn wait<F: FnMut() -> bool>(&mut self, mut ready: F) -> Result<(), TimedOut> {
        while !ready() {
            core::hint::spin_loop();
        }
        Ok(())
    }
}

/// Spin for at most a fixed number of polls
///
/// Needs no timer, so it works before any clock is set up. The real-time
/// budget scales with the core clock.
#[derive(Debug, Clone, Copy)]
pub struct BoundedSpin {
    max_polls: u32,
}

impl BoundedSpin {
    /// Create a strategy that polls at most `max_polls` times
    pub const fn new(max_polls: u32) -> Self {
        Self { max_polls }
    }

    /// Poll budget
    pub const fn max_polls(&self) -> u32 {
        self.max_polls
    }
}

impl Default for BoundedSpin {
    fn default() -> Self {
        // ~10 ms at 8 MHz with a handful of cycles per poll
        Self::new(20_000)
    }
}

impl WaitStrategy for BoundedSpin {
    fn wait<F: FnMut() -> bool>(&mut self, mut ready: F) -> Result<(), TimedOut> {
        for _ in 0..self.max_polls {
            if ready() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err(TimedOut)
    }
}

/// Poll with a delay between samples and give up after a fixed duration
///
/// The elapsed time is the sum of the requested delays, which is a lower
/// bound on wall time.
pub struct DelayTimeout<D> {
    delay: D,
    timeout_us: u32,
    poll_interval_us: u32,
}

impl<D: DelayNs> DelayTimeout<D> {
    /// Create a strategy with the given timeout, polling every microsecond
    pub fn new(delay: D, timeout_us: u32) -> Self {
        Self {
            delay,
            timeout_us,
            poll_interval_us: 1,
        }
    }

    /// Change the interval between polls (minimum 1 µs)
    pub fn with_poll_interval(mut self, poll_interval_us: u32) -> Self {
        self.poll_interval_us = poll_interval_us.max(1);
        self
    }

    /// Timeout in microseconds
    pub fn timeout_us(&self) -> u32 {
        self.timeout_us
    }

    /// Give the delay provider back
    pub fn free(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> WaitStrategy for DelayTimeout<D> {
    fn wait<F: FnMut() -> bool>(&mut self, mut ready: F) -> Result<(), TimedOut> {
        let mut elapsed_us = 0u32;
        loop {
            if ready() {
                return Ok(());
            }
            if elapsed_us >= self.timeout_us {
                return Err(TimedOut);
            }
            self.delay.delay_us(self.poll_interval_us);
            elapsed_us = elapsed_us.saturating_add(self.poll_interval_us);
        }
    }
}
