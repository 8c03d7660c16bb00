//! Mock hardware adapters for integration tests.
//!
//! `MockI2c` behaves like a BMP280 register file: the first written byte
//! sets the register pointer, further bytes are stored with auto-increment,
//! and reads stream out from the pointer.  Every register write is recorded
//! so tests can assert on the exact configuration sequence.

use std::collections::VecDeque;

use barostim::app::events::AppEvent;
use barostim::app::ports::{EventSink, SensorPort};
use barostim::error::SensorError;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

pub const ADDR: u8 = 0x76;

/// Datasheet worked-example calibration block (0x88..=0x9F).
pub const DATASHEET_CALIBRATION: [u8; 24] = [
    112, 107, 67, 103, 24, 252, 125, 142, 67, 214, 208, 11, 39, 11, 140, 0, 249, 255, 140, 60,
    248, 198, 112, 23,
];
pub const DATASHEET_RAW_T: u32 = 519_888;
pub const DATASHEET_RAW_P: u32 = 415_148;

// ── MockI2c ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError(pub ErrorKind);

impl i2c::Error for MockBusError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

pub struct MockI2c {
    pub regs: [u8; 256],
    pointer: u8,
    /// `(register, value)` for every byte written after the pointer byte.
    pub writes: Vec<(u8, u8)>,
    pub transactions: usize,
    /// Fail every transaction while set.
    pub fail_all: bool,
    /// Fail this many upcoming transactions, then recover.
    pub fail_next: usize,
    /// Fail every transaction after this many have succeeded.
    pub fail_after: Option<usize>,
}

#[allow(dead_code)]
impl MockI2c {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            pointer: 0,
            writes: Vec::new(),
            transactions: 0,
            fail_all: false,
            fail_next: 0,
            fail_after: None,
        }
    }

    /// A healthy BMP280 holding the datasheet example values.
    pub fn datasheet() -> Self {
        let mut bus = Self::new();
        bus.regs[0xD0] = 0x58;
        bus.regs[0xD1] = 0x0C;
        bus.regs[0x88..0x88 + 24].copy_from_slice(&DATASHEET_CALIBRATION);
        bus.set_raw(0xFA, DATASHEET_RAW_T);
        bus.set_raw(0xF7, DATASHEET_RAW_P);
        bus
    }

    /// Store a 20-bit value left-justified in a 3-byte data window.
    pub fn set_raw(&mut self, msb_reg: u8, raw: u32) {
        let v = raw << 4;
        let r = msb_reg as usize;
        self.regs[r] = (v >> 16) as u8;
        self.regs[r + 1] = (v >> 8) as u8;
        self.regs[r + 2] = v as u8;
    }

    pub fn written(&self, reg: u8) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(r, _)| *r == reg)
            .map(|&(_, v)| v)
            .collect()
    }
}

impl Default for MockI2c {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for MockI2c {
    type Error = MockBusError;
}

impl i2c::I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.transactions += 1;
        if self.fail_all {
            return Err(MockBusError(ErrorKind::Bus));
        }
        if self.fail_after.is_some_and(|n| self.transactions > n) {
            return Err(MockBusError(ErrorKind::Bus));
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(MockBusError(ErrorKind::Bus));
        }
        if address != ADDR {
            return Err(MockBusError(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let Some((&reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    self.pointer = reg;
                    for &b in data {
                        self.regs[self.pointer as usize] = b;
                        self.writes.push((self.pointer, b));
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
                Operation::Read(buf) => {
                    for b in buf.iter_mut() {
                        *b = self.regs[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Records requested delays instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    pub calls_ms: Vec<u32>,
    pub total_ns: u64,
}

#[allow(dead_code)]
impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.total_ns += u64::from(us) * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// ── ScriptedSensor ────────────────────────────────────────────

/// Replays queued results, then repeats `steady` forever.
pub struct ScriptedSensor {
    pub script: VecDeque<Result<i32, SensorError>>,
    pub steady: Result<i32, SensorError>,
    pub reads: usize,
}

#[allow(dead_code)]
impl ScriptedSensor {
    pub fn constant(pascals: i32) -> Self {
        Self {
            script: VecDeque::new(),
            steady: Ok(pascals),
            reads: 0,
        }
    }

    pub fn then(mut self, result: Result<i32, SensorError>) -> Self {
        self.script.push_back(result);
        self
    }

    pub fn set_steady(&mut self, pascals: i32) {
        self.steady = Ok(pascals);
    }
}

impl SensorPort for ScriptedSensor {
    fn read_pressure(&mut self) -> Result<i32, SensorError> {
        self.reads += 1;
        self.script.pop_front().unwrap_or(self.steady)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> Vec<&AppEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::BlockProcessed { .. }))
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
