//! Game service — the hexagonal core.
//!
//! [`GameService`] owns the FSM and its context.  All I/O flows through
//! port traits injected at call sites, so the whole game can be driven
//! from tests with mock adapters.
//!
//! ```text
//!  TargetPort ──▶ ┌──────────────────────┐ ──▶ EventSink
//!   ClockPort ──▶ │     GameService      │ ──▶ DisplayPort
//!                 │  FSM · Scoreboard    │ ◀─▶ HighScoreStore
//!                 └──────────────────────┘
//! ```

use core::fmt::Write as _;

use heapless::String;
use log::{info, warn};

use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::fsm::context::{GameContext, Outcome, PollInput};
use crate::fsm::scoring::{HitOutcome, HitReport};
use crate::fsm::session::Session;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, GameState};

use super::events::{Checkpoint, GameEvent, SessionReport};
use super::ports::{
    ClockPort, DisplayPort, EventSink, HighScoreStore, LedPort, SelfTestPort, StorageError,
    TargetPort,
};

/// Display rows for the headline and the detail line.
const TITLE_ROW: u8 = 15;
const DETAIL_ROW: u8 = 40;

type DisplayLine = String<24>;

pub struct GameService {
    fsm: Fsm,
    ctx: GameContext,
    started: bool,
    report: Option<SessionReport>,
}

impl GameService {
    /// Construct the service.  Does **not** start the FSM; [`setup`] does.
    ///
    /// [`setup`]: Self::setup
    pub fn new(config: GameConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), GameState::Uninitialized),
            ctx: GameContext::new(config),
            started: false,
            report: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Run the FSM's initial entry action.  Idempotent.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        if self.started {
            return;
        }
        self.started = true;
        self.fsm.start(&mut self.ctx);
        sink.emit(&GameEvent::Started(self.fsm.current_state()));
        info!("GameService started in {:?}", self.fsm.current_state());
    }

    /// Boot sequence: progress checkpoints, self-test, LED flash, target
    /// verification.  Leaves the game in `AwaitingStart`.
    ///
    /// Returns whether the self-test passed.  A failure is shown and
    /// logged but does not stop setup.
    pub fn setup(
        &mut self,
        hw: &mut (impl LedPort + SelfTestPort),
        clock: &mut impl ClockPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> bool {
        self.start(sink);
        if self.state() != GameState::Uninitialized {
            warn!("Setup requested in {:?}, ignoring", self.state());
            return false;
        }

        self.checkpoint(Checkpoint::DisplayReady, clock, display, sink);

        let rules_ok = match self.ctx.config.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Rule set rejected: {}", e);
                false
            }
        };
        self.checkpoint(Checkpoint::RulesLoaded, clock, display, sink);

        self.transition_to(GameState::Verifying, sink);
        let ready = self.initial_state_ok() && rules_ok && hw.io_set();
        if ready {
            self.checkpoint(Checkpoint::SystemReady, clock, display, sink);
        } else {
            warn!("Self-test failed, continuing setup");
            self.checkpoint(Checkpoint::SelfTestFailed, clock, display, sink);
        }

        hw.flash_leds();
        self.checkpoint(Checkpoint::LedsFlashed, clock, display, sink);

        hw.verify_targets();
        self.checkpoint(Checkpoint::TargetsVerified, clock, display, sink);

        self.ctx.verification_complete = true;
        let prev = self.state();
        self.fsm.tick(&mut self.ctx);
        self.emit_transition(prev, sink);

        show(display, "PRESS START", "");
        ready
    }

    // ── Per-poll orchestration ────────────────────────────────

    /// Sample whatever the current state listens to, then advance.
    ///
    /// The start button is only read while awaiting start and the target
    /// chain only while a session has time left.
    pub fn poll(
        &mut self,
        hw: &mut impl TargetPort,
        clock: &mut impl ClockPort,
        display: &mut impl DisplayPort,
        store: &mut impl HighScoreStore,
        sink: &mut impl EventSink,
    ) -> GameState {
        let now_ms = clock.now_ms();
        let input = match self.state() {
            GameState::AwaitingStart => PollInput {
                start_pressed: hw.sample_start_button(),
                hit: None,
            },
            GameState::Running
                if !self
                    .ctx
                    .session
                    .is_expired(now_ms, self.ctx.config.session_duration_ms) =>
            {
                PollInput {
                    start_pressed: false,
                    hit: hw.target_hit(),
                }
            }
            _ => PollInput::default(),
        };
        self.advance(now_ms, input, display, store, sink)
    }

    /// Advance the game by one poll with already-sampled inputs.
    pub fn advance(
        &mut self,
        now_ms: u32,
        input: PollInput,
        display: &mut impl DisplayPort,
        store: &mut impl HighScoreStore,
        sink: &mut impl EventSink,
    ) -> GameState {
        let prev = self.state();
        self.ctx.now_ms = now_ms;
        self.ctx.input = input;
        self.fsm.tick(&mut self.ctx);
        self.ctx.input = PollInput::default();

        if let Some(report) = self.ctx.last_hit.take() {
            emit_hit(&report, sink);
        }

        let state = self.state();
        self.emit_transition(prev, sink);

        let refresh = core::mem::take(&mut self.ctx.requests.refresh_display);
        if state == GameState::Ended && prev != GameState::Ended {
            self.finish(display, store, sink);
        } else if refresh {
            self.render_score(display);
        }
        state
    }

    /// Poll until the session has ended and return its report.
    ///
    /// Fails with [`Error::NotReady`] if [`setup`](Self::setup) has not
    /// completed.  Once ended, returns the same report immediately.
    pub fn run_session(
        &mut self,
        hw: &mut impl TargetPort,
        clock: &mut impl ClockPort,
        display: &mut impl DisplayPort,
        store: &mut impl HighScoreStore,
        sink: &mut impl EventSink,
    ) -> Result<SessionReport> {
        if matches!(
            self.state(),
            GameState::Uninitialized | GameState::Verifying
        ) {
            return Err(Error::NotReady);
        }
        while !self.is_complete() {
            self.poll(hw, clock, display, store, sink);
        }
        self.report.ok_or(Error::NotReady)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> GameState {
        self.fsm.current_state()
    }

    pub fn score(&self) -> u8 {
        self.ctx.scoreboard.score()
    }

    pub fn multiplier_active(&self) -> bool {
        self.ctx.scoreboard.multiplier_active()
    }

    pub fn session(&self) -> Session {
        self.ctx.session
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.ctx.outcome
    }

    /// `true` once the session has ended.  Only a reset starts another.
    pub fn is_complete(&self) -> bool {
        self.fsm.is_terminal()
    }

    pub fn report(&self) -> Option<SessionReport> {
        self.report
    }

    // ── Internal ──────────────────────────────────────────────

    /// Score zero, no session, bonus off, default scoring values.
    fn initial_state_ok(&self) -> bool {
        let ok = self.ctx.scoreboard.score() == 0
            && !self.ctx.session.is_started()
            && !self.ctx.scoreboard.multiplier_active()
            && self.ctx.config.has_default_scoring();
        if !ok {
            warn!(
                "Initial state check failed: score={} session={:?} bonus={} target_value={} multiplier={}",
                self.ctx.scoreboard.score(),
                self.ctx.session,
                self.ctx.scoreboard.multiplier_active(),
                self.ctx.config.target_value,
                self.ctx.config.point_multiplier
            );
        }
        ok
    }

    fn checkpoint(
        &mut self,
        checkpoint: Checkpoint,
        clock: &mut impl ClockPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        info!("Setup checkpoint {}", checkpoint.label());
        show(display, checkpoint.label(), "");
        sink.emit(&GameEvent::Checkpoint(checkpoint));
        clock.delay_ms(self.ctx.config.checkpoint_hold_ms);
    }

    fn transition_to(&mut self, next: GameState, sink: &mut impl EventSink) {
        let prev = self.state();
        self.fsm.force_transition(next, &mut self.ctx);
        self.emit_transition(prev, sink);
    }

    fn emit_transition(&self, prev: GameState, sink: &mut impl EventSink) {
        let to = self.state();
        if to != prev {
            sink.emit(&GameEvent::StateChanged { from: prev, to });
        }
    }

    fn finish(
        &mut self,
        display: &mut impl DisplayPort,
        store: &mut impl HighScoreStore,
        sink: &mut impl EventSink,
    ) {
        let Some(outcome) = self.ctx.outcome else {
            warn!("Session ended without an outcome");
            return;
        };
        let score = self.ctx.scoreboard.score();
        let title = match outcome {
            Outcome::Win => "YOU WIN!",
            Outcome::Lose => "GAME OVER",
        };
        show(display, title, "");

        // The slot can take a while to commit; the title is already up.
        let (high_score, new_high_score) = persist_high_score(score, store, sink);
        let mut detail = DisplayLine::new();
        let _ = write!(detail, "SCORE {} HI {}", score, high_score);
        display.set_cursor(0, DETAIL_ROW);
        display.print(&detail);

        let report = SessionReport {
            outcome,
            score,
            high_score,
            new_high_score,
        };
        info!(
            "Session over after {} polls: {:?}, score {}, high score {}",
            self.ctx.total_ticks, outcome, score, high_score
        );
        self.report = Some(report);
        sink.emit(&GameEvent::SessionEnded(report));
    }

    fn render_score(&self, display: &mut impl DisplayPort) {
        let mut title = DisplayLine::new();
        let _ = write!(title, "SCORE {}", self.ctx.scoreboard.score());
        let mut detail = DisplayLine::new();
        if self.ctx.scoreboard.multiplier_active() {
            let _ = write!(detail, "BONUS x{}", self.ctx.config.point_multiplier);
        }
        show(display, &title, &detail);
    }
}

fn show(display: &mut impl DisplayPort, title: &str, detail: &str) {
    display.clear();
    display.set_cursor(0, TITLE_ROW);
    display.print(title);
    if !detail.is_empty() {
        display.set_cursor(0, DETAIL_ROW);
        display.print(detail);
    }
}

fn emit_hit(report: &HitReport, sink: &mut impl EventSink) {
    if let Some(active) = report.bonus_changed {
        info!(
            "Bonus multiplier {} at {} ms",
            if active { "on" } else { "off" },
            report.elapsed_ms
        );
        sink.emit(&GameEvent::BonusChanged {
            active,
            elapsed_ms: report.elapsed_ms,
        });
    }
    match report.outcome {
        HitOutcome::Accepted {
            points,
            score,
            bonus,
        } => sink.emit(&GameEvent::HitAccepted {
            target: report.target,
            points,
            score,
            bonus,
        }),
        HitOutcome::Rejected { since_last_ms } => sink.emit(&GameEvent::HitRejected {
            target: report.target,
            since_last_ms,
        }),
    }
}

/// Store `score` if it beats the stored value or nothing has been stored.
/// Returns the high score now on record and whether it was raised.
///
/// A failed read leaves the slot alone so a transient fault cannot
/// clobber a real record.
fn persist_high_score(
    score: u8,
    store: &mut impl HighScoreStore,
    sink: &mut impl EventSink,
) -> (u8, bool) {
    let stored = match store.read_high_score() {
        Ok(value) => value,
        Err(StorageError::NotFound) => 0,
        Err(e) => {
            warn!("High score read failed: {}, leaving it untouched", e);
            return (0, false);
        }
    };

    if score <= stored && stored != 0 {
        return (stored, false);
    }

    match store.write_high_score(score) {
        Ok(()) => {
            let raised = score > stored;
            if raised {
                info!("New high score: {} (was {})", score, stored);
                sink.emit(&GameEvent::HighScoreUpdated {
                    previous: stored,
                    new: score,
                });
            }
            (score, raised)
        }
        Err(e) => {
            warn!("High score write failed: {}", e);
            (stored, false)
        }
    }
}
