//! Application service — the control loop.
//!
//! [`AppService`] owns the FSM and the loop context.  All I/O flows through
//! the port traits and the `DelayNs` effect injected at call sites, making
//! the whole loop testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                 │        AppService           │
//!     DelayNs ◀── │  FSM · filter · classifier  │
//!                 └────────────────────────────┘
//! ```
//!
//! ## Steady-state read failures
//!
//! A failed or degenerate sample is skipped: nothing is appended to the
//! window, the failure is counted and emitted, and the loop carries on
//! with the next cycle.  There is no in-cycle retry.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::history::{AverageHistory, HISTORY_CAPACITY};
use crate::control::stimulation::StimulationParams;
use crate::error::Result;
use crate::fsm::context::{LoopContext, WINDOW_CAPACITY};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::events::AppEvent;
use super::ports::{EventSink, SensorPort};

pub struct AppService<const N: usize = WINDOW_CAPACITY, const M: usize = HISTORY_CAPACITY> {
    fsm: Fsm<N, M>,
    ctx: LoopContext<N, M>,
    tick_count: u64,
}

impl<const N: usize, const M: usize> AppService<N, M> {
    /// Construct the service from a validated configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Result<Self> {
        config.validate()?;
        let ctx = LoopContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Collecting);
        Ok(Self {
            fsm,
            ctx,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "Control loop started: window={} history={} alpha={:.4}",
            N,
            M,
            self.ctx.conditioner.alpha()
        );
    }

    /// Start, then tick forever.  Only process shutdown ends the loop.
    pub fn run(
        &mut self,
        sensor: &mut impl SensorPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> ! {
        self.start(sink);
        loop {
            self.tick(sensor, delay, sink);
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One cycle: sample (while collecting) → FSM → events → yield.
    pub fn tick(
        &mut self,
        sensor: &mut impl SensorPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();

        // 1. Read one sample via SensorPort
        if prev_state == StateId::Collecting {
            match sensor.read_pressure() {
                Ok(pascals) => {
                    self.ctx.pending_sample = Some(pascals);
                    delay.delay_ms(self.ctx.config.sample_delay_ms);
                }
                Err(error) => {
                    self.ctx.rejected_samples = self.ctx.rejected_samples.saturating_add(1);
                    warn!("Pressure sample skipped: {}", error);
                    sink.emit(&AppEvent::SampleRejected {
                        error,
                        total: self.ctx.rejected_samples,
                    });
                }
            }
        }

        // 2. FSM tick (pure pipeline logic)
        self.fsm.tick(&mut self.ctx);

        // 3. Report a finished block
        if let Some(outcome) = self.ctx.last_block.take() {
            sink.emit(&AppEvent::BlockProcessed {
                block: self.ctx.blocks_processed,
                outcome,
            });
        }

        // 4. Emit state change if the FSM moved
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        // 5. Cooperative yield
        delay.delay_ms(self.ctx.config.cycle_delay_ms);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn current_state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn stimulation(&self) -> StimulationParams {
        self.ctx.stimulation
    }

    pub fn history(&self) -> &AverageHistory<M> {
        &self.ctx.history
    }

    pub fn context(&self) -> &LoopContext<N, M> {
        &self.ctx
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
