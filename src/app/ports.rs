//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (the pressure sensor, event sinks) implement these
//! traits.  The [`AppService`](super::service::AppService) consumes them via
//! generics, so the control loop never touches the I2C bus directly.
//! The cooperative delay is the `embedded_hal::delay::DelayNs` trait and
//! needs no port of its own.

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per collecting tick.
pub trait SensorPort {
    /// One compensated pressure sample, truncated to whole pascals.
    ///
    /// Bus failures and degenerate compensation results are errors; the
    /// loop skips the sample instead of storing a bogus value.
    fn read_pressure(&mut self) -> Result<i32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
