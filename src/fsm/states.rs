//! Concrete state handler functions and table builder.
//!
//! ```text
//!              [window full]
//!  COLLECTING ──────────────▶ PROCESSING
//!      ▲                          │
//!      └────[block processed]─────┘
//!            (window cleared)
//! ```

use super::context::{BlockOutcome, LoopContext};
use super::{StateDescriptor, StateId};
use crate::control::fatigue::classify;
use crate::control::stimulation::params_for;
use log::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table<const N: usize, const M: usize>() -> [StateDescriptor<N, M>; StateId::COUNT] {
    [
        // Index 0 — Collecting
        StateDescriptor {
            id: StateId::Collecting,
            name: "Collecting",
            on_enter: Some(collecting_enter),
            on_exit: None,
            on_update: collecting_update,
        },
        // Index 1 — Processing
        StateDescriptor {
            id: StateId::Processing,
            name: "Processing",
            on_enter: None,
            on_exit: Some(processing_exit),
            on_update: processing_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  COLLECTING state
// ═══════════════════════════════════════════════════════════════════════════

fn collecting_enter<const N: usize, const M: usize>(ctx: &mut LoopContext<N, M>) {
    debug!("Collecting {} samples", ctx.samples_remaining());
}

fn collecting_update<const N: usize, const M: usize>(ctx: &mut LoopContext<N, M>) -> Option<StateId> {
    if let Some(sample) = ctx.pending_sample.take() {
        if ctx.window.push(sample).is_err() {
            // Only reachable if a transition was missed; never grow past N.
            warn!("Sample window full, dropping {} Pa", sample);
        }
    }

    ctx.window.is_full().then_some(StateId::Processing)
}

// ═══════════════════════════════════════════════════════════════════════════
//  PROCESSING state
// ═══════════════════════════════════════════════════════════════════════════

fn processing_update<const N: usize, const M: usize>(ctx: &mut LoopContext<N, M>) -> Option<StateId> {
    let outcome = match ctx.conditioner.filter_and_average(&ctx.window) {
        Ok(average) => {
            ctx.history.push(average);
            match ctx.history.normalized(average) {
                Some(normalized) => {
                    let level = classify(normalized);
                    let params = params_for(level);
                    ctx.fatigue = Some(level);
                    ctx.stimulation = params;
                    BlockOutcome::Classified {
                        average,
                        normalized,
                        level,
                        params,
                    }
                }
                None => {
                    warn!("Baseline is zero, skipping classification (avg={})", average);
                    BlockOutcome::Unclassified { average }
                }
            }
        }
        Err(e) => {
            warn!("Conditioning failed: {}", e);
            BlockOutcome::Failed(e)
        }
    };

    ctx.blocks_processed = ctx.blocks_processed.wrapping_add(1);
    ctx.last_block = Some(outcome);

    if let BlockOutcome::Classified { level, params, .. } = outcome {
        info!(
            "Block {}: fatigue {} -> {}mA {}us {}Hz",
            ctx.blocks_processed, level, params.amplitude_ma, params.pulse_width_us, params.frequency_hz
        );
    }

    Some(StateId::Collecting)
}

fn processing_exit<const N: usize, const M: usize>(ctx: &mut LoopContext<N, M>) {
    ctx.window.clear();
}
