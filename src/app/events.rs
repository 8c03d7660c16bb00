//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::error::SensorError;
use crate::fsm::StateId;
use crate::fsm::context::BlockOutcome;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The control loop has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// A sample could not be read and was skipped.
    SampleRejected {
        error: SensorError,
        /// Running total of rejected samples.
        total: u32,
    },

    /// A full window went through the pipeline.
    BlockProcessed {
        /// 1-based block number.
        block: u32,
        outcome: BlockOutcome,
    },
}
