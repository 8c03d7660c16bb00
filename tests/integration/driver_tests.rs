//! BMP280 driver against the register-map mock bus.

use barostim::adapters::hardware::HardwareAdapter;
use barostim::app::ports::SensorPort;
use barostim::error::SensorError;
use barostim::sensors::bmp280::{
    Bmp280, IirFilter, Mode, Oversampling, SensorSettings, Standby, TFine,
};

use super::mock_hw::{ADDR, DATASHEET_RAW_P, DATASHEET_RAW_T, MockDelay, MockI2c};

fn ready_sensor() -> Bmp280<MockI2c> {
    let mut sensor = Bmp280::new(MockI2c::datasheet(), ADDR);
    sensor
        .init(&SensorSettings::default(), &mut MockDelay::new(), 100)
        .expect("init");
    sensor
}

// ── Identification ────────────────────────────────────────────

#[test]
fn identify_accepts_bmp280() {
    let mut sensor = Bmp280::new(MockI2c::datasheet(), ADDR);
    assert_eq!(sensor.identify(), Ok(0x58));
}

#[test]
fn identify_rejects_other_chip() {
    let mut bus = MockI2c::datasheet();
    bus.regs[0xD0] = 0x60; // BME280
    let mut sensor = Bmp280::new(bus, ADDR);
    assert_eq!(
        sensor.identify(),
        Err(SensorError::DeviceMismatch { found: 0x60 })
    );
}

#[test]
fn identify_reports_bus_failure() {
    let mut bus = MockI2c::datasheet();
    bus.fail_all = true;
    let mut sensor = Bmp280::new(bus, ADDR);
    assert_eq!(sensor.identify(), Err(SensorError::Io));
}

#[test]
fn wrong_address_is_io_error() {
    let mut sensor = Bmp280::new(MockI2c::datasheet(), 0x77);
    assert_eq!(sensor.identify(), Err(SensorError::Io));
}

// ── Bring-up ──────────────────────────────────────────────────

#[test]
fn init_configures_and_settles() {
    let mut delay = MockDelay::new();
    let mut sensor = Bmp280::new(MockI2c::datasheet(), ADDR);
    sensor
        .init(&SensorSettings::default(), &mut delay, 100)
        .unwrap();

    assert!(sensor.calibration().is_some());
    assert_eq!(delay.calls_ms, vec![100]);

    let bus = sensor.release();
    assert_eq!(bus.written(0xF4), vec![0b0101_0111]);
    assert_eq!(bus.written(0xF5), vec![0x00]);
}

#[test]
fn init_aborts_on_mismatch_without_configuring() {
    let mut bus = MockI2c::datasheet();
    bus.regs[0xD0] = 0x55;
    let mut delay = MockDelay::new();
    let mut sensor = Bmp280::new(bus, ADDR);

    let err = sensor
        .init(&SensorSettings::default(), &mut delay, 100)
        .unwrap_err();
    assert_eq!(err, SensorError::DeviceMismatch { found: 0x55 });
    assert!(sensor.calibration().is_none());
    assert!(delay.calls_ms.is_empty());
    assert!(sensor.release().writes.is_empty());
}

#[test]
fn init_aborts_when_calibration_read_fails() {
    let mut bus = MockI2c::datasheet();
    // identify succeeds, the calibration burst fails
    bus.fail_after = Some(1);
    let mut delay = MockDelay::new();
    let mut sensor = Bmp280::new(bus, ADDR);

    let err = sensor
        .init(&SensorSettings::default(), &mut delay, 100)
        .unwrap_err();
    assert_eq!(err, SensorError::Io);
    assert!(sensor.calibration().is_none());
    assert!(sensor.release().writes.is_empty());
}

#[test]
fn configure_packs_all_fields() {
    let mut sensor = Bmp280::new(MockI2c::datasheet(), ADDR);
    let settings = SensorSettings {
        mode: Mode::Forced,
        temperature_oversampling: Oversampling::X1,
        pressure_oversampling: Oversampling::X4,
        filter: IirFilter::X8,
        standby: Standby::Ms500,
    };
    sensor.configure(&settings).unwrap();
    let bus = sensor.release();
    // 001 011 01
    assert_eq!(bus.written(0xF4), vec![0b0010_1101]);
    // 100 011 00
    assert_eq!(bus.written(0xF5), vec![0b1000_1100]);
}

#[test]
fn calibration_is_read_once() {
    let mut sensor = Bmp280::new(MockI2c::datasheet(), ADDR);
    let first = sensor.load_calibration().unwrap();
    let again = sensor.load_calibration().unwrap();
    assert_eq!(first, again);
    assert_eq!(first.dig_t1, 27504);
    assert_eq!(first.dig_p9, 6000);
    assert_eq!(sensor.release().transactions, 1);
}

#[test]
fn soft_reset_writes_command() {
    let mut delay = MockDelay::new();
    let mut sensor = Bmp280::new(MockI2c::datasheet(), ADDR);
    sensor.soft_reset(&mut delay).unwrap();
    assert_eq!(delay.calls_ms, vec![2]);
    assert_eq!(sensor.release().written(0xE0), vec![0xB6]);
}

#[test]
fn chip_version_and_status() {
    let mut bus = MockI2c::datasheet();
    bus.regs[0xF3] = 0b0000_1001;
    let mut sensor = Bmp280::new(bus, ADDR);
    assert_eq!(sensor.chip_version(), Ok(0x0C));
    let status = sensor.status().unwrap();
    assert!(status.measuring);
    assert!(status.im_update);
}

// ── Raw data and compensation ─────────────────────────────────

#[test]
fn raw_reads_drop_low_nibble() {
    let mut bus = MockI2c::datasheet();
    bus.regs[0xF7] = 0x65;
    bus.regs[0xF8] = 0x5A;
    bus.regs[0xF9] = 0xCF; // low nibble is not data
    let mut sensor = Bmp280::new(bus, ADDR);
    assert_eq!(sensor.read_raw_pressure(), Ok(0x655AC));
    assert_eq!(sensor.read_raw_temperature(), Ok(DATASHEET_RAW_T));
}

#[test]
fn measure_requires_calibration() {
    let mut sensor = Bmp280::new(MockI2c::datasheet(), ADDR);
    assert_eq!(sensor.measure(), Err(SensorError::NotCalibrated));
}

#[test]
fn measure_reproduces_datasheet_example() {
    let mut sensor = ready_sensor();
    let reading = sensor.measure().unwrap();
    assert_eq!(reading.temperature_centi, 2508);
    assert_eq!(reading.pressure_q24_8, 25_767_233);
    assert_eq!(reading.whole_pascals(), 100_653);
    assert!((reading.celsius() - 25.08).abs() < 1e-4);
    assert!((reading.pascals() - 100_653.25).abs() < 0.05);
}

#[test]
fn pressure_uses_fresh_t_fine() {
    let mut sensor = ready_sensor();
    let cal = *sensor.calibration().unwrap();
    let stale = cal.compensate_pressure(DATASHEET_RAW_P, TFine(0));
    let reading = sensor.measure().unwrap();
    assert_ne!(reading.pressure_q24_8, stale);
}

// ── HardwareAdapter ───────────────────────────────────────────

#[test]
fn adapter_reports_whole_pascals() {
    let mut hw = HardwareAdapter::new(ready_sensor());
    assert_eq!(hw.read_pressure(), Ok(100_653));
    assert_eq!(hw.last_reading().map(|r| r.temperature_centi), Some(2508));
    assert_eq!(hw.sensor_mut().chip_version(), Ok(0x0C));
}

#[test]
fn adapter_rejects_degenerate_reading() {
    let mut bus = MockI2c::datasheet();
    // dig_P1 = 0 zeroes the first-stage denominator
    bus.regs[0x8E] = 0;
    bus.regs[0x8F] = 0;
    let mut sensor = Bmp280::new(bus, ADDR);
    sensor
        .init(&SensorSettings::default(), &mut MockDelay::new(), 0)
        .unwrap();
    assert_eq!(sensor.measure().map(|r| r.pressure_q24_8), Ok(0));

    let mut hw = HardwareAdapter::new(sensor);
    assert_eq!(hw.read_pressure(), Err(SensorError::DegenerateReading));
    assert!(hw.last_reading().is_none());
}

#[test]
fn adapter_reports_bus_failure() {
    let mut bus = MockI2c::datasheet();
    // identify + calibration + two config writes succeed
    bus.fail_after = Some(4);
    let mut sensor = Bmp280::new(bus, ADDR);
    sensor
        .init(&SensorSettings::default(), &mut MockDelay::new(), 0)
        .unwrap();

    let mut hw = HardwareAdapter::new(sensor);
    assert_eq!(hw.read_pressure(), Err(SensorError::Io));
    assert!(hw.last_reading().is_none());
}
