//! Table-driven state machine for the collect/process cycle.
//!
//! ```text
//!  state      on_enter            on_update            on_exit
//!  ─────────  ──────────────────  ───────────────────  ────────────────
//!  Collecting collecting_enter    collecting_update    —
//!  Processing —                   processing_update    processing_exit
//! ```
//!
//! A tick runs the current row's `on_update`.  A `Some(next)` result runs
//! the current `on_exit`, switches rows and runs the new `on_enter`, all
//! within the same tick.  Handlers are plain `fn` pointers over
//! [`LoopContext`], so the table is plain data with no boxing.

pub mod context;
pub mod states;

use context::LoopContext;
use log::debug;

/// Row index into the state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// Sample window not yet full: one pressure sample per tick.
    Collecting = 0,
    /// Window full: condition, classify, map, then clear the window.
    Processing = 1,
}

impl StateId {
    pub const COUNT: usize = 2;

    const fn row(self) -> usize {
        self as usize
    }
}

/// `on_enter` / `on_exit` hook.
pub type StateActionFn<const N: usize, const M: usize> = fn(&mut LoopContext<N, M>);

/// Per-tick handler; `Some(next)` requests a transition.
pub type StateUpdateFn<const N: usize, const M: usize> = fn(&mut LoopContext<N, M>) -> Option<StateId>;

pub struct StateDescriptor<const N: usize, const M: usize> {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn<N, M>>,
    pub on_exit: Option<StateActionFn<N, M>>,
    pub on_update: StateUpdateFn<N, M>,
}

pub struct Fsm<const N: usize, const M: usize> {
    table: [StateDescriptor<N, M>; StateId::COUNT],
    state: StateId,
    /// Ticks spent in `state`, reset on every transition.
    ticks_in_state: u64,
}

impl<const N: usize, const M: usize> Fsm<N, M> {
    pub fn new(table: [StateDescriptor<N, M>; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id.row() == i),
            "state table rows out of order"
        );
        Self {
            table,
            state: initial,
            ticks_in_state: 0,
        }
    }

    fn row(&self) -> &StateDescriptor<N, M> {
        &self.table[self.state.row()]
    }

    /// Fire the initial state's `on_enter`.  Call once before ticking.
    pub fn start(&mut self, ctx: &mut LoopContext<N, M>) {
        debug!("FSM start in {}", self.row().name);
        if let Some(enter) = self.row().on_enter {
            enter(ctx);
        }
    }

    pub fn tick(&mut self, ctx: &mut LoopContext<N, M>) {
        self.ticks_in_state += 1;

        let update = self.row().on_update;
        if let Some(next) = update(ctx) {
            self.enter(next, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        self.state
    }

    pub fn ticks_in_current_state(&self) -> u64 {
        self.ticks_in_state
    }

    fn enter(&mut self, next: StateId, ctx: &mut LoopContext<N, M>) {
        debug!(
            "FSM {} -> {} after {} ticks",
            self.row().name,
            self.table[next.row()].name,
            self.ticks_in_state
        );

        if let Some(exit) = self.row().on_exit {
            exit(ctx);
        }
        self.state = next;
        self.ticks_in_state = 0;
        if let Some(enter) = self.row().on_enter {
            enter(ctx);
        }
    }
}
