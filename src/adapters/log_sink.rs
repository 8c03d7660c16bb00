//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (UART / USB-CDC in production).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::fsm::context::BlockOutcome;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                debug!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::SampleRejected { error, total } => {
                warn!("SAMPLE | rejected: {} (total {})", error, total);
            }
            AppEvent::BlockProcessed { block, outcome } => match outcome {
                BlockOutcome::Classified {
                    average,
                    normalized,
                    level,
                    params,
                } => {
                    info!(
                        "BLOCK {} | avg={}Pa ratio={:.3} fatigue={} | stim {}mA {}us {}Hz",
                        block,
                        average,
                        normalized,
                        level,
                        params.amplitude_ma,
                        params.pulse_width_us,
                        params.frequency_hz,
                    );
                }
                BlockOutcome::Unclassified { average } => {
                    info!("BLOCK {} | avg={}Pa | zero baseline, not classified", block, average);
                }
                BlockOutcome::Failed(e) => {
                    warn!("BLOCK {} | failed: {}", block, e);
                }
            },
        }
    }
}
