//! Signal conditioning and fatigue control pipeline.
//!
//! ```text
//!  window ──▶ filter ──▶ block average ──▶ history ──▶ ratio to baseline
//!                                                          │
//!                    stimulation params ◀── table ◀── classify
//! ```
//!
//! Everything here is pure computation over caller-owned state; the
//! control loop in [`crate::app::service`] decides when each stage runs.

pub mod fatigue;
pub mod filter;
pub mod history;
pub mod stimulation;
