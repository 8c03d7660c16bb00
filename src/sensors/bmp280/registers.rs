//! BMP280 register map (Bosch BMP280 datasheet, section 4.3).

/// Default 7-bit I2C address (SDO tied to GND).
pub const ADDRESS_PRIMARY: u8 = 0x76;
/// Alternate 7-bit I2C address (SDO tied to VDDIO).
pub const ADDRESS_SECONDARY: u8 = 0x77;

/// Value of the chip-id register on a genuine BMP280.
pub const CHIP_ID: u8 = 0x58;
/// Writing this to [`Register::SoftReset`] runs the power-on-reset sequence.
pub const SOFT_RESET_CMD: u8 = 0xB6;

/// Length of the factory calibration block starting at [`Register::DigT1`].
pub const CALIBRATION_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// First of 12 little-endian coefficient pairs (0x88..=0x9F).
    DigT1 = 0x88,
    ChipId = 0xD0,
    Version = 0xD1,
    SoftReset = 0xE0,
    /// bit 3 = measuring, bit 0 = NVM image update in progress.
    Status = 0xF3,
    /// osrs_t[7:5] | osrs_p[4:2] | mode[1:0]
    CtrlMeas = 0xF4,
    /// t_sb[7:5] | filter[4:2] | spi3w_en[0]
    Config = 0xF5,
    /// press_msb, press_lsb, press_xlsb
    PressMsb = 0xF7,
    /// temp_msb, temp_lsb, temp_xlsb
    TempMsb = 0xFA,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

pub const STATUS_MEASURING: u8 = 1 << 3;
pub const STATUS_IM_UPDATE: u8 = 1 << 0;
