//! Measurement settings and their packing into `ctrl_meas` / `config`.

use serde::{Deserialize, Serialize};

/// Power mode (`ctrl_meas[1:0]`).  `0b10` is an alias of forced mode and
/// is never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Mode {
    Sleep = 0,
    Forced = 1,
    Normal = 3,
}

/// Number of internal conversions averaged per reported sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Oversampling {
    /// Measurement skipped; the data register holds 0x80000.
    Skipped = 0,
    X1 = 1,
    X2 = 2,
    X4 = 3,
    X8 = 4,
    X16 = 5,
}

/// On-chip IIR filter coefficient (`config[4:2]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum IirFilter {
    Off = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
    X16 = 4,
}

/// Inactive time between conversions in normal mode (`config[7:5]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Standby {
    Ms1 = 0,
    Ms63 = 1,
    Ms125 = 2,
    Ms250 = 3,
    Ms500 = 4,
    Ms1000 = 5,
    Ms2000 = 6,
    Ms4000 = 7,
}

impl Standby {
    /// Nominal standby duration in whole milliseconds (0.5 ms and 62.5 ms
    /// round up).
    pub const fn millis(self) -> u32 {
        match self {
            Self::Ms1 => 1,
            Self::Ms63 => 63,
            Self::Ms125 => 125,
            Self::Ms250 => 250,
            Self::Ms500 => 500,
            Self::Ms1000 => 1000,
            Self::Ms2000 => 2000,
            Self::Ms4000 => 4000,
        }
    }
}

/// Full sensor configuration written by [`Bmp280::configure`](super::Bmp280::configure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSettings {
    pub mode: Mode,
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
    pub filter: IirFilter,
    pub standby: Standby,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            temperature_oversampling: Oversampling::X2,
            pressure_oversampling: Oversampling::X16,
            filter: IirFilter::Off,
            standby: Standby::Ms1,
        }
    }
}

impl SensorSettings {
    /// `ctrl_meas` = osrs_t << 5 | osrs_p << 2 | mode
    pub const fn ctrl_meas(&self) -> u8 {
        ((self.temperature_oversampling as u8) << 5)
            | ((self.pressure_oversampling as u8) << 2)
            | self.mode as u8
    }

    /// `config` = t_sb << 5 | filter << 2  (3-wire SPI stays disabled)
    pub const fn config(&self) -> u8 {
        ((self.standby as u8) << 5) | ((self.filter as u8) << 2)
    }
}
