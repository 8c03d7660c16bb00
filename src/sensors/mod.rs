//! Sensor drivers.

pub mod bmp280;
