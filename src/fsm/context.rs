//! Shared mutable context threaded through every FSM handler.
//!
//! `GameContext` is the blackboard the state handlers read from and write
//! to: the poll inputs for this tick, the active rules, session timing,
//! the scoreboard, and requests for the service to act on.

use serde::Serialize;

use super::scoring::{HitReport, Scoreboard};
use super::session::Session;
use crate::config::GameConfig;
use crate::targets::Target;

/// What the service sampled from the hardware before this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollInput {
    pub start_pressed: bool,
    pub hit: Option<Target>,
}

impl PollInput {
    pub fn start() -> Self {
        Self {
            start_pressed: true,
            hit: None,
        }
    }

    pub fn hit(target: Target) -> Self {
        Self {
            start_pressed: false,
            hit: Some(target),
        }
    }
}

/// Final classification of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Side effects the handlers ask the service to carry out after the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Requests {
    pub refresh_display: bool,
}

pub struct GameContext {
    /// Millisecond clock reading for this tick.
    pub now_ms: u32,
    pub input: PollInput,
    pub config: GameConfig,
    pub session: Session,
    pub scoreboard: Scoreboard,
    /// Set by the service once the boot-time checks have run.
    pub verification_complete: bool,
    pub outcome: Option<Outcome>,
    /// Most recent scored (or rejected) hit, taken by the service.
    pub last_hit: Option<HitReport>,
    pub requests: Requests,
    /// Polls since the FSM started, for the end-of-session log.
    pub total_ticks: u64,
}

impl GameContext {
    pub fn new(config: GameConfig) -> Self {
        Self {
            now_ms: 0,
            input: PollInput::default(),
            config,
            session: Session::default(),
            scoreboard: Scoreboard::new(),
            verification_complete: false,
            outcome: None,
            last_hit: None,
            requests: Requests::default(),
            total_ticks: 0,
        }
    }

    /// Milliseconds into the running session, 0 before it starts.
    pub fn elapsed_ms(&self) -> u32 {
        self.session.elapsed_ms(self.now_ms).unwrap_or(0)
    }

    /// Whether the session clock has run out at this tick's time.
    pub fn session_expired(&self) -> bool {
        self.session
            .is_expired(self.now_ms, self.config.session_duration_ms)
    }
}
