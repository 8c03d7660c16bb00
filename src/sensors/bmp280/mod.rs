//! Bosch BMP280 barometric pressure sensor driver (I2C).
//!
//! Generic over any `embedded_hal::i2c::I2c` bus so the same code runs on
//! the ESP-IDF I2C driver and on the host against a register-map mock.
//!
//! ## Bring-up order
//!
//! 1. [`identify`](Bmp280::identify): chip id must read 0x58.
//! 2. [`load_calibration`](Bmp280::load_calibration): once per power-up.
//! 3. [`configure`](Bmp280::configure): oversampling, mode, filter, standby.
//!
//! [`init`](Bmp280::init) runs all three plus the settle delay.
//!
//! ## Reading cycle
//!
//! Temperature compensation produces a [`TFine`] that is passed by value
//! into pressure compensation, so a pressure reading can never be computed
//! from a stale temperature.  [`measure`](Bmp280::measure) does both.

pub mod calibration;
pub mod registers;
pub mod settings;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, I2c};
use log::{debug, error, info};

use crate::error::SensorError;
pub use calibration::{Calibration, TFine};
use registers::{CALIBRATION_LEN, CHIP_ID, Register, SOFT_RESET_CMD};
pub use settings::{IirFilter, Mode, Oversampling, SensorSettings, Standby};

/// Datasheet start-up time after power-on or soft reset.
const STARTUP_MS: u32 = 2;

/// One compensated temperature + pressure pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompensatedReading {
    /// Hundredths of a degree Celsius (2508 = 25.08 °C).
    pub temperature_centi: i32,
    /// Pascals in unsigned Q24.8.  Zero marks a degenerate reading.
    pub pressure_q24_8: u32,
}

impl CompensatedReading {
    pub fn celsius(&self) -> f32 {
        self.temperature_centi as f32 / 100.0
    }

    pub fn pascals(&self) -> f32 {
        self.pressure_q24_8 as f32 / 256.0
    }

    /// Pressure truncated to whole pascals.
    pub fn whole_pascals(&self) -> i32 {
        (self.pressure_q24_8 >> 8) as i32
    }

    pub fn is_degenerate(&self) -> bool {
        self.pressure_q24_8 == 0
    }
}

/// Decoded status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// A conversion is running.
    pub measuring: bool,
    /// NVM data is being copied to image registers.
    pub im_update: bool,
}

pub struct Bmp280<I2C> {
    i2c: I2C,
    address: u8,
    calibration: Option<Calibration>,
}

impl<I2C: I2c> Bmp280<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            calibration: None,
        }
    }

    /// Give the bus back (e.g. to share it with another device).
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    // ── Bring-up ──────────────────────────────────────────────

    /// Read the chip-id register and check it against the BMP280 id.
    pub fn identify(&mut self) -> Result<u8, SensorError> {
        let id = self.read_u8(Register::ChipId)?;
        debug!("BMP280 @0x{:02X}: chip id 0x{:02X}", self.address, id);
        if id != CHIP_ID {
            error!(
                "BMP280 @0x{:02X}: invalid chip id, expected 0x{:02X}, got 0x{:02X}",
                self.address, CHIP_ID, id
            );
            return Err(SensorError::DeviceMismatch { found: id });
        }
        Ok(id)
    }

    /// Silicon revision from the version register.
    pub fn chip_version(&mut self) -> Result<u8, SensorError> {
        self.read_u8(Register::Version)
    }

    /// Power-on-reset the device and wait out the start-up time.
    ///
    /// Measurement settings return to sleep mode; the cached calibration
    /// stays valid because it lives in factory NVM.
    pub fn soft_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), SensorError> {
        self.write_u8(Register::SoftReset, SOFT_RESET_CMD)?;
        delay.delay_ms(STARTUP_MS);
        info!("BMP280 @0x{:02X}: soft reset", self.address);
        Ok(())
    }

    /// Write `ctrl_meas` and `config`.
    pub fn configure(&mut self, settings: &SensorSettings) -> Result<(), SensorError> {
        self.write_u8(Register::CtrlMeas, settings.ctrl_meas())?;
        self.write_u8(Register::Config, settings.config())?;
        debug!(
            "BMP280 @0x{:02X}: ctrl_meas=0x{:02X} config=0x{:02X}",
            self.address,
            settings.ctrl_meas(),
            settings.config()
        );
        Ok(())
    }

    /// Read the factory coefficients.  After the first successful load the
    /// cached copy is returned without touching the bus.
    pub fn load_calibration(&mut self) -> Result<Calibration, SensorError> {
        if let Some(cal) = self.calibration {
            return Ok(cal);
        }

        let mut buf = [0u8; CALIBRATION_LEN];
        self.read_burst(Register::DigT1, &mut buf)?;
        let cal = Calibration::from_bytes(&buf);

        info!(
            "BMP280 calibration: T1={} T2={} T3={} | P1={} P2={} P3={} P4={} P5={} P6={} P7={} P8={} P9={}",
            cal.dig_t1,
            cal.dig_t2,
            cal.dig_t3,
            cal.dig_p1,
            cal.dig_p2,
            cal.dig_p3,
            cal.dig_p4,
            cal.dig_p5,
            cal.dig_p6,
            cal.dig_p7,
            cal.dig_p8,
            cal.dig_p9,
        );

        self.calibration = Some(cal);
        Ok(cal)
    }

    /// Identify, load calibration, configure, then wait `settle_ms` for the
    /// first conversion.  Any failure aborts bring-up.
    pub fn init(
        &mut self,
        settings: &SensorSettings,
        delay: &mut impl DelayNs,
        settle_ms: u32,
    ) -> Result<(), SensorError> {
        self.identify()?;
        self.load_calibration()?;
        self.configure(settings)?;
        delay.delay_ms(settle_ms);
        info!("BMP280 @0x{:02X}: ready ({:?})", self.address, settings.mode);
        Ok(())
    }

    // ── Data ──────────────────────────────────────────────────

    pub fn status(&mut self) -> Result<Status, SensorError> {
        let raw = self.read_u8(Register::Status)?;
        Ok(Status {
            measuring: raw & registers::STATUS_MEASURING != 0,
            im_update: raw & registers::STATUS_IM_UPDATE != 0,
        })
    }

    /// 20-bit uncompensated temperature.
    pub fn read_raw_temperature(&mut self) -> Result<u32, SensorError> {
        self.read_u20(Register::TempMsb)
    }

    /// 20-bit uncompensated pressure.
    pub fn read_raw_pressure(&mut self) -> Result<u32, SensorError> {
        self.read_u20(Register::PressMsb)
    }

    /// One full reading cycle: temperature first, then pressure with the
    /// fresh `t_fine`.
    pub fn measure(&mut self) -> Result<CompensatedReading, SensorError> {
        let cal = self.calibration.ok_or(SensorError::NotCalibrated)?;

        let raw_t = self.read_raw_temperature()?;
        let (temperature_centi, t_fine) = cal.compensate_temperature(raw_t);

        let raw_p = self.read_raw_pressure()?;
        let pressure_q24_8 = cal.compensate_pressure(raw_p, t_fine);

        Ok(CompensatedReading {
            temperature_centi,
            pressure_q24_8,
        })
    }

    // ── Register access ───────────────────────────────────────

    fn read_u8(&mut self, reg: Register) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.read_burst(reg, &mut buf)?;
        Ok(buf[0])
    }

    /// The sensor left-justifies 20-bit results in a 24-bit window.
    fn read_u20(&mut self, reg: Register) -> Result<u32, SensorError> {
        let mut buf = [0u8; 3];
        self.read_burst(reg, &mut buf)?;
        let raw = (u32::from(buf[0]) << 16) | (u32::from(buf[1]) << 8) | u32::from(buf[2]);
        Ok(raw >> 4)
    }

    fn read_burst(&mut self, reg: Register, buf: &mut [u8]) -> Result<(), SensorError> {
        self.i2c
            .write_read(self.address, &[reg.addr()], buf)
            .map_err(|e| {
                debug!("BMP280 read 0x{:02X} failed: {:?}", reg.addr(), e.kind());
                SensorError::Io
            })
    }

    fn write_u8(&mut self, reg: Register, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[reg.addr(), value])
            .map_err(|e| {
                debug!("BMP280 write 0x{:02X} failed: {:?}", reg.addr(), e.kind());
                SensorError::Io
            })
    }
}
