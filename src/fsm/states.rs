//! Concrete state handler functions and table builder.
//!
//! ```text
//!  UNINITIALIZED ──[setup]──▶ VERIFYING ──[checks done]──▶ AWAITING_START
//!                                                                │
//!                                                       [start pressed]
//!                                                                ▼
//!                          ENDED ◀──[elapsed ≥ duration]──── RUNNING
//! ```
//!
//! `Ended` is terminal: only a device reset leaves it.

use super::context::{GameContext, Outcome};
use super::{GameState, StateDescriptor};
use log::info;

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; GameState::COUNT] {
    [
        StateDescriptor {
            id: GameState::Uninitialized,
            name: "Uninitialized",
            terminal: false,
            on_enter: None,
            on_exit: None,
            on_update: uninitialized_update,
        },
        StateDescriptor {
            id: GameState::Verifying,
            name: "Verifying",
            terminal: false,
            on_enter: Some(verifying_enter),
            on_exit: None,
            on_update: verifying_update,
        },
        StateDescriptor {
            id: GameState::AwaitingStart,
            name: "AwaitingStart",
            terminal: false,
            on_enter: Some(awaiting_start_enter),
            on_exit: None,
            on_update: awaiting_start_update,
        },
        StateDescriptor {
            id: GameState::Running,
            name: "Running",
            terminal: false,
            on_enter: Some(running_enter),
            on_exit: Some(running_exit),
            on_update: running_update,
        },
        StateDescriptor {
            id: GameState::Ended,
            name: "Ended",
            terminal: true,
            on_enter: Some(ended_enter),
            on_exit: None,
            on_update: ended_update,
        },
    ]
}

// ── Uninitialized ─────────────────────────────────────────────

/// Setup is driven from outside; nothing to do per tick.
fn uninitialized_update(_ctx: &mut GameContext) -> Option<GameState> {
    None
}

// ── Verifying ─────────────────────────────────────────────────

fn verifying_enter(_ctx: &mut GameContext) {
    info!("VERIFYING: running boot checks");
}

fn verifying_update(ctx: &mut GameContext) -> Option<GameState> {
    ctx.verification_complete.then_some(GameState::AwaitingStart)
}

// ── AwaitingStart ─────────────────────────────────────────────

fn awaiting_start_enter(_ctx: &mut GameContext) {
    info!("AWAITING START: press the start button");
}

fn awaiting_start_update(ctx: &mut GameContext) -> Option<GameState> {
    ctx.input.start_pressed.then_some(GameState::Running)
}

// ── Running ───────────────────────────────────────────────────

fn running_enter(ctx: &mut GameContext) {
    ctx.scoreboard.reset();
    ctx.session.start(ctx.now_ms);
    ctx.requests.refresh_display = true;
    info!(
        "RUNNING: session started at {} ms, {} ms on the clock",
        ctx.now_ms, ctx.config.session_duration_ms
    );
}

fn running_update(ctx: &mut GameContext) -> Option<GameState> {
    // Expiry wins over a hit observed on the same tick.
    if ctx.session_expired() {
        return Some(GameState::Ended);
    }

    if let Some(target) = ctx.input.hit {
        let report =
            ctx.scoreboard
                .register_hit(target, ctx.now_ms, ctx.elapsed_ms(), &ctx.config);
        if report.accepted() {
            ctx.requests.refresh_display = true;
        }
        ctx.last_hit = Some(report);
    }
    None
}

fn running_exit(ctx: &mut GameContext) {
    ctx.session.end();
}

// ── Ended ─────────────────────────────────────────────────────

fn ended_enter(ctx: &mut GameContext) {
    let score = ctx.scoreboard.score();
    let outcome = if score >= ctx.config.win_threshold {
        Outcome::Win
    } else {
        Outcome::Lose
    };
    ctx.outcome = Some(outcome);
    ctx.requests.refresh_display = true;
    info!("ENDED: {:?} with {} points", outcome, score);
}

fn ended_update(_ctx: &mut GameContext) -> Option<GameState> {
    None
}
