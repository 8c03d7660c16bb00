//! System configuration parameters
//!
//! All tunable parameters for the BaroStim loop.  Window and history
//! capacities are compile-time (const generics on the loop context); every
//! runtime knob lives here.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sensors::bmp280::SensorSettings;
use crate::sensors::bmp280::registers::{ADDRESS_PRIMARY, ADDRESS_SECONDARY};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Sensor ---
    /// 7-bit I2C address of the BMP280 (0x76 or 0x77)
    pub sensor_address: u8,
    /// Oversampling, mode, IIR filter and standby written at init
    pub sensor: SensorSettings,

    // --- Signal conditioning ---
    /// Low-pass cutoff frequency (Hz)
    pub cutoff_hz: f32,
    /// Nominal sampling rate the filter is designed for (Hz)
    pub sample_rate_hz: f32,

    // --- Timing ---
    /// Yield after each successful sample read (milliseconds)
    pub sample_delay_ms: u32,
    /// Yield at the end of every loop cycle (milliseconds)
    pub cycle_delay_ms: u32,
    /// Wait after configuring the sensor before the first read (milliseconds)
    pub settle_delay_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Sensor
            sensor_address: ADDRESS_PRIMARY,
            sensor: SensorSettings::default(),

            // Signal conditioning
            cutoff_hz: crate::control::filter::DEFAULT_CUTOFF_HZ,
            sample_rate_hz: crate::control::filter::DEFAULT_SAMPLE_RATE_HZ,

            // Timing
            sample_delay_ms: 10,
            cycle_delay_ms: 10,
            settle_delay_ms: 100,
        }
    }
}

impl SystemConfig {
    /// Reject values that would make the loop misbehave rather than
    /// clamping them.
    pub fn validate(&self) -> Result<()> {
        if self.sensor_address != ADDRESS_PRIMARY && self.sensor_address != ADDRESS_SECONDARY {
            return Err(Error::Config("sensor_address must be 0x76 or 0x77"));
        }
        if !(self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0) {
            return Err(Error::Config("sample_rate_hz must be positive"));
        }
        if !(self.cutoff_hz.is_finite() && self.cutoff_hz > 0.0) {
            return Err(Error::Config("cutoff_hz must be positive"));
        }
        if self.cutoff_hz >= self.sample_rate_hz / 2.0 {
            return Err(Error::Config("cutoff_hz must be below Nyquist"));
        }
        if self.cycle_delay_ms == 0 {
            return Err(Error::Config("cycle_delay_ms must be non-zero"));
        }
        Ok(())
    }
}
