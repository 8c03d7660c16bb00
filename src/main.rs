//! BaroStim Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                    │
//! │                                                            │
//! │  HardwareAdapter (SensorPort)      LogEventSink (EventSink)│
//! │  └─ Bmp280<I2cDriver>              FreeRtos (DelayNs)      │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ──────────────       │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │         AppService (pure logic, never returns)       │  │
//! │  │   FSM · low-pass · history · classifier · table      │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wiring: BMP280 SDA on GPIO8, SCL on GPIO9, I2C0 at 400 kHz.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use log::{error, info};

use barostim::adapters::hardware::HardwareAdapter;
use barostim::adapters::log_sink::LogEventSink;
use barostim::app::service::AppService;
use barostim::config::SystemConfig;
use barostim::error::Error;
use barostim::sensors::bmp280::Bmp280;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("BaroStim v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();

    // ── 2. I2C bus ────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let i2c_config = I2cConfig::new().baudrate(400.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8,
        peripherals.pins.gpio9,
        &i2c_config,
    )?;
    let mut delay = FreeRtos;

    // ── 3. Sensor bring-up (fatal on failure) ─────────────────
    let mut sensor = Bmp280::new(i2c, config.sensor_address);
    if let Err(e) = sensor.init(&config.sensor, &mut delay, config.settle_delay_ms) {
        error!("BMP280 not found: {}", e);
        return Err(Error::from(e).into());
    }
    if let Ok(version) = sensor.chip_version() {
        info!("BMP280 silicon version 0x{:02X}", version);
    }

    // ── 4. Control loop ───────────────────────────────────────
    let mut hw = HardwareAdapter::new(sensor);
    let mut sink = LogEventSink::new();
    let mut service: AppService = AppService::new(config)?;

    service.run(&mut hw, &mut delay, &mut sink)
}
