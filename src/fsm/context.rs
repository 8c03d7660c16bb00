//! Mutable context threaded through every FSM handler.
//!
//! `LoopContext` is the single struct that state handlers read from and
//! write to: the sample window, the average history, the filter, the
//! latest stimulation output and the loop counters.  It is owned by the
//! [`AppService`](crate::app::service::AppService); nothing else holds a
//! reference to it, so no locking is involved.

use heapless::Vec;

use crate::config::SystemConfig;
use crate::control::fatigue::FatigueLevel;
use crate::control::filter::{FILTER_CAPACITY, SignalConditioner};
use crate::control::history::{AverageHistory, HISTORY_CAPACITY};
use crate::control::stimulation::StimulationParams;
use crate::error::SignalError;

/// Samples per processing block.
pub const WINDOW_CAPACITY: usize = 100;

// ---------------------------------------------------------------------------
// Block outcome (written by the Processing handler; drained by the service)
// ---------------------------------------------------------------------------

/// What happened to one full window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockOutcome {
    /// Ratio to baseline computed and new parameters selected.
    Classified {
        average: i32,
        normalized: f32,
        level: FatigueLevel,
        params: StimulationParams,
    },
    /// Baseline is zero, so no ratio exists; parameters are unchanged.
    Unclassified { average: i32 },
    /// The conditioner rejected the window.
    Failed(SignalError),
}

// ---------------------------------------------------------------------------
// LoopContext
// ---------------------------------------------------------------------------

pub struct LoopContext<const N: usize = WINDOW_CAPACITY, const M: usize = HISTORY_CAPACITY> {
    // -- Input --
    /// Sample read by the service this tick, consumed by `Collecting`.
    pub pending_sample: Option<i32>,

    // -- Pipeline state --
    /// Whole-pascal pressure samples for the current block.
    pub window: Vec<i32, N>,
    pub history: AverageHistory<M>,
    pub conditioner: SignalConditioner<FILTER_CAPACITY>,

    // -- Outputs --
    /// Parameters currently requested from the stimulator.
    pub stimulation: StimulationParams,
    /// Most recent classification, if any block has been classified.
    pub fatigue: Option<FatigueLevel>,
    /// Set by `Processing`, taken by the service to emit an event.
    pub last_block: Option<BlockOutcome>,

    // -- Counters --
    pub blocks_processed: u32,
    /// Samples dropped because the sensor read failed or was degenerate.
    pub rejected_samples: u32,

    // -- Configuration --
    pub config: SystemConfig,
}

impl<const N: usize, const M: usize> LoopContext<N, M> {
    pub fn new(config: SystemConfig) -> Self {
        const {
            assert!(N > 0 && N <= FILTER_CAPACITY, "window must fit the filter buffer");
        };
        Self {
            pending_sample: None,
            window: Vec::new(),
            history: AverageHistory::new(),
            conditioner: SignalConditioner::new(config.cutoff_hz, config.sample_rate_hz),
            stimulation: StimulationParams::OFF,
            fatigue: None,
            last_block: None,
            blocks_processed: 0,
            rejected_samples: 0,
            config,
        }
    }

    /// Samples still needed before the next processing block.
    pub fn samples_remaining(&self) -> usize {
        N - self.window.len()
    }
}
