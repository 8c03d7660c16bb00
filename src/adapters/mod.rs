//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to           |
//! |------------|-------------|-----------------------|
//! | `hardware` | SensorPort  | BMP280 over I2C       |
//! | `log_sink` | EventSink   | Serial log output     |

pub mod hardware;
pub mod log_sink;
