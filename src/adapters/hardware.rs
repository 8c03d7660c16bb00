//! Hardware adapter — bridges the BMP280 driver to the domain port trait.
//!
//! This is the only module in the loop path that touches the I2C bus.
//! It also owns the degenerate-reading policy: the driver reports the
//! datasheet's sentinel 0, and this adapter turns it into an error so the
//! control loop never stores it as a sample.

use embedded_hal::i2c::I2c;

use crate::app::ports::SensorPort;
use crate::error::SensorError;
use crate::sensors::bmp280::{Bmp280, CompensatedReading};

pub struct HardwareAdapter<I2C> {
    sensor: Bmp280<I2C>,
    last_reading: Option<CompensatedReading>,
}

impl<I2C: I2c> HardwareAdapter<I2C> {
    /// Wrap an initialised driver (see [`Bmp280::init`]).
    pub fn new(sensor: Bmp280<I2C>) -> Self {
        Self {
            sensor,
            last_reading: None,
        }
    }

    /// Last good reading, including temperature.
    pub fn last_reading(&self) -> Option<CompensatedReading> {
        self.last_reading
    }

    pub fn sensor_mut(&mut self) -> &mut Bmp280<I2C> {
        &mut self.sensor
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I2C: I2c> SensorPort for HardwareAdapter<I2C> {
    fn read_pressure(&mut self) -> Result<i32, SensorError> {
        let reading = self.sensor.measure()?;
        if reading.is_degenerate() {
            return Err(SensorError::DegenerateReading);
        }
        self.last_reading = Some(reading);
        Ok(reading.whole_pascals())
    }
}
