//! Outbound game events.
//!
//! The [`GameService`](super::service::GameService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters decide what to do
//! with them: log to serial, forward to a scoreboard, record in a test.

use serde::Serialize;

use crate::fsm::GameState;
use crate::fsm::context::Outcome;
use crate::targets::Target;

/// Structured events emitted by the game core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The service has started (carries initial state).
    Started(GameState),

    /// The FSM transitioned between states.
    StateChanged { from: GameState, to: GameState },

    /// A setup milestone was reached and shown.
    Checkpoint(Checkpoint),

    /// The bonus multiplier switched on or off.
    BonusChanged { active: bool, elapsed_ms: u32 },

    /// A hit was scored.
    HitAccepted {
        target: Target,
        points: u8,
        score: u8,
        bonus: bool,
    },

    /// A hit landed inside the target's cooldown and was ignored.
    HitRejected { target: Target, since_last_ms: u32 },

    /// A new high score was persisted.
    HighScoreUpdated { previous: u8, new: u8 },

    /// The session is over.
    SessionEnded(SessionReport),
}

/// Boot-time progress markers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Checkpoint {
    /// Display is up.
    DisplayReady,
    /// Rule set loaded and range-checked.
    RulesLoaded,
    /// Initial state and port directions look right.
    SystemReady,
    /// Initial state or port directions are wrong.  Setup continues.
    SelfTestFailed,
    /// LED flash test finished.
    LedsFlashed,
    /// Target verification finished.
    TargetsVerified,
}

impl Checkpoint {
    /// Short progress label for the display.
    pub fn label(self) -> &'static str {
        match self {
            Self::DisplayReady => "0%",
            Self::RulesLoaded => "25%",
            Self::SystemReady => "50%",
            Self::SelfTestFailed => "FAIL",
            Self::LedsFlashed => "75%",
            Self::TargetsVerified => "100%",
        }
    }
}

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub outcome: Outcome,
    pub score: u8,
    /// Stored high score after this session.
    pub high_score: u8,
    pub new_high_score: bool,
}
