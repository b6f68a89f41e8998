//! Function-pointer finite state machine engine for the game flow.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable                                                  │
//! │  ┌───────────────┬──────────┬─────────┬───────────────────┐  │
//! │  │ GameState     │ on_enter │ on_exit │ on_update         │  │
//! │  ├───────────────┼──────────┼─────────┼───────────────────┤  │
//! │  │ Uninitialized │ -        │ -       │ fn(ctx)->Option<> │  │
//! │  │ Verifying     │ fn(ctx)  │ -       │ fn(ctx)->Option<> │  │
//! │  │ AwaitingStart │ fn(ctx)  │ -       │ fn(ctx)->Option<> │  │
//! │  │ Running       │ fn(ctx)  │ fn(ctx) │ fn(ctx)->Option<> │  │
//! │  │ Ended         │ fn(ctx)  │ -       │ fn(ctx)->Option<> │  │
//! │  └───────────────┴──────────┴─────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the current state.  If it
//! returns `Some(next)`, the engine runs `on_exit` for the current state,
//! then `on_enter` for the next.  Terminal states refuse every transition.

pub mod context;
pub mod scoring;
pub mod session;
pub mod states;

use context::GameContext;
use log::{info, warn};
use serde::Serialize;

/// Every state the game can be in.
/// Must stay in sync with [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum GameState {
    Uninitialized = 0,
    Verifying = 1,
    AwaitingStart = 2,
    Running = 3,
    Ended = 4,
}

impl GameState {
    pub const COUNT: usize = 5;

    /// Out-of-range indices map to `Ended` (asserts in debug builds).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Uninitialized,
            1 => Self::Verifying,
            2 => Self::AwaitingStart,
            3 => Self::Running,
            4 => Self::Ended,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Ended
            }
        }
    }
}

pub type StateActionFn = fn(&mut GameContext);

/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut GameContext) -> Option<GameState>;

/// One row in the state table.
pub struct StateDescriptor {
    pub id: GameState,
    pub name: &'static str,
    pub terminal: bool,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

pub struct Fsm {
    table: [StateDescriptor; GameState::COUNT],
    current: usize,
    tick_count: u64,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; GameState::COUNT], initial: GameState) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
        }
    }

    /// Run the initial `on_enter`.  Call once before the first `tick()`.
    pub fn start(&mut self, ctx: &mut GameContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance by one tick; returns the state after any transition.
    pub fn tick(&mut self, ctx: &mut GameContext) -> GameState {
        self.tick_count += 1;
        ctx.total_ticks = self.tick_count;

        if let Some(next_id) = (self.table[self.current].on_update)(ctx) {
            self.transition(next_id, ctx);
        }
        self.current_state()
    }

    /// Jump to `next` regardless of what `on_update` would say.
    pub fn force_transition(&mut self, next: GameState, ctx: &mut GameContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> GameState {
        GameState::from_index(self.current)
    }

    pub fn is_terminal(&self) -> bool {
        self.table[self.current].terminal
    }

    fn transition(&mut self, next_id: GameState, ctx: &mut GameContext) {
        let next_idx = next_id as usize;

        if self.table[self.current].terminal {
            warn!(
                "FSM: ignoring {} -> {}, {} is terminal",
                self.table[self.current].name,
                self.table[next_idx].name,
                self.table[self.current].name
            );
            return;
        }

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
