//! Unified error types for the BaroStim firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they
//! can be passed through the FSM context and event sink without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The pressure sensor could not be reached or returned unusable data.
    Sensor(SensorError),
    /// The signal-conditioning pipeline rejected its input.
    Signal(SignalError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Signal(e) => write!(f, "signal: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// An I2C transaction failed (NACK, arbitration loss, bus fault).
    Io,
    /// The chip-id register did not hold the BMP280 id.
    DeviceMismatch { found: u8 },
    /// Compensation was requested before the calibration NVM was read.
    NotCalibrated,
    /// Pressure compensation hit a zero denominator and produced the
    /// sentinel value 0.
    DegenerateReading,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "I2C transaction failed"),
            Self::DeviceMismatch { found } => {
                write!(f, "unexpected chip id 0x{found:02X} (expected 0x58)")
            }
            Self::NotCalibrated => write!(f, "calibration not loaded"),
            Self::DegenerateReading => write!(f, "degenerate pressure reading"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Signal-conditioning errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalError {
    /// More samples were supplied than the filter buffer can hold.
    Overflow { count: usize, capacity: usize },
    /// No samples were supplied, so there is no mean to compute.
    EmptyWindow,
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { count, capacity } => {
                write!(f, "{count} samples exceed filter capacity {capacity}")
            }
            Self::EmptyWindow => write!(f, "empty sample window"),
        }
    }
}

impl From<SignalError> for Error {
    fn from(e: SignalError) -> Self {
        Self::Signal(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
