//! BaroStim firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  The BMP280 driver is generic over `embedded_hal` traits,
//! so nothing here depends on ESP-IDF; the on-target wiring lives in
//! `main.rs`.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod fsm;
pub mod sensors;
