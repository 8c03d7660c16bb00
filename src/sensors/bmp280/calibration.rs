//! Factory trimming coefficients and the datasheet compensation formulas.
//!
//! Both formulas are the fixed-point reference code from the BMP280
//! datasheet (section 8.2).  Intermediate arithmetic wraps exactly like the
//! 32/64-bit two's-complement C reference, so arbitrary raw values or
//! coefficients never panic and in-range inputs match bit-for-bit.

use super::registers::CALIBRATION_LEN;

/// Fine-resolution temperature carried from temperature compensation into
/// pressure compensation.  Only valid for the reading cycle that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TFine(pub i32);

/// The 12 coefficients stored in NVM at 0x88..=0x9F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calibration {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
}

impl Calibration {
    /// Decode the little-endian calibration burst.
    pub fn from_bytes(buf: &[u8; CALIBRATION_LEN]) -> Self {
        let u = |i: usize| u16::from_le_bytes([buf[i], buf[i + 1]]);
        let s = |i: usize| i16::from_le_bytes([buf[i], buf[i + 1]]);
        Self {
            dig_t1: u(0),
            dig_t2: s(2),
            dig_t3: s(4),
            dig_p1: u(6),
            dig_p2: s(8),
            dig_p3: s(10),
            dig_p4: s(12),
            dig_p5: s(14),
            dig_p6: s(16),
            dig_p7: s(18),
            dig_p8: s(20),
            dig_p9: s(22),
        }
    }

    /// Returns temperature in hundredths of a degree Celsius together with
    /// the `t_fine` value that pressure compensation needs.
    pub fn compensate_temperature(&self, raw: u32) -> (i32, TFine) {
        let adc = raw as i32;
        let t1 = i32::from(self.dig_t1);
        let t2 = i32::from(self.dig_t2);
        let t3 = i32::from(self.dig_t3);

        let var1 = ((adc >> 3).wrapping_sub(t1 << 1)).wrapping_mul(t2) >> 11;
        let d = (adc >> 4).wrapping_sub(t1);
        let var2 = (d.wrapping_mul(d) >> 12).wrapping_mul(t3) >> 14;

        let t_fine = var1.wrapping_add(var2);
        let centi = t_fine.wrapping_mul(5).wrapping_add(128) >> 8;
        (centi, TFine(t_fine))
    }

    /// Returns pressure in Pa as unsigned Q24.8 (divide by 256 for Pa).
    ///
    /// A zero first-stage denominator yields 0 instead of a division; the
    /// caller must treat 0 as a degenerate reading, never as a measurement.
    pub fn compensate_pressure(&self, raw: u32, t_fine: TFine) -> u32 {
        let p1 = i64::from(self.dig_p1);
        let p2 = i64::from(self.dig_p2);
        let p3 = i64::from(self.dig_p3);
        let p4 = i64::from(self.dig_p4);
        let p5 = i64::from(self.dig_p5);
        let p6 = i64::from(self.dig_p6);
        let p7 = i64::from(self.dig_p7);
        let p8 = i64::from(self.dig_p8);
        let p9 = i64::from(self.dig_p9);

        let mut var1 = i64::from(t_fine.0) - 128_000;
        let mut var2 = var1.wrapping_mul(var1).wrapping_mul(p6);
        var2 = var2.wrapping_add(var1.wrapping_mul(p5) << 17);
        var2 = var2.wrapping_add(p4 << 35);
        var1 = (var1.wrapping_mul(var1).wrapping_mul(p3) >> 8)
            .wrapping_add(var1.wrapping_mul(p2) << 12);
        var1 = ((1_i64 << 47).wrapping_add(var1)).wrapping_mul(p1) >> 33;

        if var1 == 0 {
            return 0;
        }

        let mut p = 1_048_576 - i64::from(raw);
        p = ((p << 31).wrapping_sub(var2))
            .wrapping_mul(3125)
            .wrapping_div(var1);
        var1 = p9.wrapping_mul(p >> 13).wrapping_mul(p >> 13) >> 25;
        var2 = p8.wrapping_mul(p) >> 19;
        p = (p.wrapping_add(var1).wrapping_add(var2) >> 8).wrapping_add(p7 << 4);
        p as u32
    }
}
