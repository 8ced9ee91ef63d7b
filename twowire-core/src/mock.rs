//! Simulated TWI peripheral for host tests
//!
//! Models the master-mode state machine of the AVR TWI block closely enough
//! to drive the controller: START/STOP handling, address and data phases
//! with scripted ACK/NACK, and receive with ACK/NACK. Every bus-level
//! action is recorded as an [`Event`] so tests can assert exact sequences.

use std::collections::VecDeque;

use twowire_hal::{Control, TwiRegisters};

/// Bus-level action seen by the simulated peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start,
    Stop,
    Write(u8),
    ReadAck,
    ReadNack,
}

/// Simulated register block
#[derive(Debug, Default)]
pub struct MockTwi {
    /// Recorded bus actions
    pub events: Vec<Event>,
    /// Last bit-rate register write
    pub bit_rate: Option<u8>,
    /// Last prescaler write
    pub prescaler: Option<u8>,
    /// Last own-address register write
    pub own_address: Option<u8>,
    /// Last control value written
    pub last_control: Control,
    /// Indices (into transmitted bytes, address bytes included) to NACK
    nack_writes: Vec<usize>,
    /// Status to report for the next transmitted byte instead of the
    /// simulated one
    forced_status: Option<u8>,
    /// Bytes the addressed device sends back
    rx: VecDeque<u8>,
    /// Never raise the ready flag
    hang: bool,
    control: Control,
    status: u8,
    data: u8,
    started: bool,
    expect_address: bool,
    receiving: bool,
    tx_count: usize,
}

impl MockTwi {
    pub fn new() -> Self {
        Self {
            status: 0xF8,
            ..Default::default()
        }
    }

    /// NACK the transmitted byte at `index` (0 = first address byte)
    pub fn nack_write(mut self, index: usize) -> Self {
        self.nack_writes.push(index);
        self
    }

    /// Report `status` for the next transmitted byte
    pub fn force_status(mut self, status: u8) -> Self {
        self.forced_status = Some(status);
        self
    }

    /// Queue bytes to be received
    pub fn respond_with(mut self, bytes: &[u8]) -> Self {
        self.rx.extend(bytes.iter().copied());
        self
    }

    /// Never complete any operation
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    /// Number of STOP conditions issued
    pub fn stop_count(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Stop).count()
    }

    fn transmit(&mut self) {
        let byte = self.data;
        self.events.push(Event::Write(byte));
        let ack = !self.nack_writes.contains(&self.tx_count);
        self.tx_count += 1;

        let simulated = if self.expect_address {
            self.expect_address = false;
            self.receiving = byte & 1 == 1;
            match (self.receiving, ack) {
                (false, true) => 0x18,
                (false, false) => 0x20,
                (true, true) => 0x40,
                (true, false) => 0x48,
            }
        } else if ack {
            0x28
        } else {
            0x30
        };
        self.status = self.forced_status.take().unwrap_or(simulated);
    }

    fn receive(&mut self, ack: bool) {
        self.events.push(if ack { Event::ReadAck } else { Event::ReadNack });
        self.data = self.rx.pop_front().unwrap_or(0xFF);
        self.status = if ack { 0x50 } else { 0x58 };
    }
}

impl TwiRegisters for MockTwi {
    fn write_bit_rate(&mut self, divisor: u8) {
        self.bit_rate = Some(divisor);
    }

    fn write_prescaler(&mut self, prescaler: u8) {
        self.prescaler = Some(prescaler);
    }

    fn write_control(&mut self, control: Control) {
        self.last_control = control;

        if !control.contains(Control::INT) {
            self.control = control;
            return;
        }

        // Writing INT clears the ready flag
        self.control = Control::from_bits(control.bits() & !Control::INT.bits());

        if control.contains(Control::STOP) {
            self.events.push(Event::Stop);
            self.started = false;
            self.receiving = false;
            self.status = 0xF8;
            // No ready flag after a bare STOP
            return;
        }

        if control.contains(Control::START) {
            self.events.push(Event::Start);
            self.status = if self.started { 0x10 } else { 0x08 };
            self.started = true;
            self.expect_address = true;
        } else if self.receiving && !self.expect_address {
            self.receive(control.contains(Control::ACK));
        } else {
            self.transmit();
        }

        if !self.hang {
            self.control |= Control::INT;
        }
    }

    fn read_control(&mut self) -> Control {
        self.control
    }

    fn read_status(&mut self) -> u8 {
        self.status | self.prescaler.unwrap_or(0)
    }

    fn write_data(&mut self, byte: u8) {
        self.data = byte;
    }

    fn read_data(&mut self) -> u8 {
        self.data
    }

    fn write_own_address(&mut self, value: u8) {
        self.own_address = Some(value);
    }
}
