//! Mock adapters for integration tests.
//!
//! All mocks share one [`Timeline`], so the clock, the start button and
//! the target pulses agree on "now".  Each scan costs 1 ms, an empty scan
//! a further 10 ms guard, matching the real port layer.

use std::cell::Cell;
use std::rc::Rc;

use lasertarget::app::events::GameEvent;
use lasertarget::app::ports::{
    ClockPort, DisplayPort, EventSink, HighScoreStore, LedPort, SelfTestPort, StorageError,
    TargetPort,
};
use lasertarget::targets::{Led, SignalState, Target};

const SCAN_COST_MS: u32 = 1;
const EMPTY_SCAN_GUARD_MS: u32 = 10;
/// Default length of a laser pulse on a target.
pub const PULSE_MS: u32 = 20;

// ── Timeline ──────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct Timeline(Rc<Cell<u32>>);

#[allow(dead_code)]
impl Timeline {
    pub fn now(&self) -> u32 {
        self.0.get()
    }

    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

// ── FakeClock ─────────────────────────────────────────────────

pub struct FakeClock {
    time: Timeline,
    pub delays: Vec<u32>,
}

impl FakeClock {
    pub fn new(time: &Timeline) -> Self {
        Self {
            time: time.clone(),
            delays: Vec::new(),
        }
    }
}

impl ClockPort for FakeClock {
    fn now_ms(&mut self) -> u32 {
        self.time.now()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.time.advance(ms);
    }
}

// ── MockHardware ──────────────────────────────────────────────

/// A target held at the hit level for `[from_ms, from_ms + len_ms)`.
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    pub target: Target,
    pub from_ms: u32,
    pub len_ms: u32,
}

impl Pulse {
    fn active_at(&self, now: u32) -> bool {
        now.wrapping_sub(self.from_ms) < self.len_ms
    }
}

pub struct MockHardware {
    time: Timeline,
    pulses: Vec<Pulse>,
    start_pressed_from: Option<u32>,
    pub io_ok: bool,
    pub verify_hits: u8,
    pub flashes: usize,
    pub io_checks: usize,
    pub button_samples: usize,
    pub scans: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(time: &Timeline) -> Self {
        Self {
            time: time.clone(),
            pulses: Vec::new(),
            start_pressed_from: None,
            io_ok: true,
            verify_hits: 0,
            flashes: 0,
            io_checks: 0,
            button_samples: 0,
            scans: 0,
        }
    }

    /// Hold the start button down from `at_ms` on.
    pub fn press_start_at(&mut self, at_ms: u32) {
        self.start_pressed_from = Some(at_ms);
    }

    pub fn pulse(&mut self, target: Target, from_ms: u32) {
        self.pulse_for(target, from_ms, PULSE_MS);
    }

    pub fn pulse_for(&mut self, target: Target, from_ms: u32, len_ms: u32) {
        self.pulses.push(Pulse {
            target,
            from_ms,
            len_ms,
        });
    }
}

impl TargetPort for MockHardware {
    fn sample_start_button(&mut self) -> bool {
        self.button_samples += 1;
        let now = self.time.now();
        self.time.advance(SCAN_COST_MS);
        self.start_pressed_from.is_some_and(|at| now >= at)
    }

    /// Lowest-indexed target with an active pulse, like the real chain.
    fn target_hit(&mut self) -> Option<Target> {
        self.scans += 1;
        let now = self.time.now();
        self.time.advance(SCAN_COST_MS);
        let hit = self
            .pulses
            .iter()
            .filter(|p| p.active_at(now))
            .map(|p| p.target)
            .min_by_key(|t| t.index());
        if hit.is_none() {
            self.time.advance(EMPTY_SCAN_GUARD_MS);
        }
        hit
    }
}

impl LedPort for MockHardware {
    fn set_led_state(&mut self, _led: Led, _state: SignalState) {}

    fn flash_leds(&mut self) {
        self.flashes += 1;
    }
}

impl SelfTestPort for MockHardware {
    fn io_set(&mut self) -> bool {
        self.io_checks += 1;
        self.io_ok
    }

    fn verify_hits_required(&self) -> u8 {
        self.verify_hits
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    /// Text printed since the last clear.
    pub frame: Vec<String>,
    /// Every print, in order.
    pub printed: Vec<String>,
    pub clears: usize,
}

impl DisplayPort for MockDisplay {
    fn clear(&mut self) {
        self.clears += 1;
        self.frame.clear();
    }

    fn set_cursor(&mut self, _x: u8, _y: u8) {}

    fn print(&mut self, text: &str) {
        self.frame.push(text.to_string());
        self.printed.push(text.to_string());
    }
}

// ── MockStore ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockStore {
    pub value: Option<u8>,
    pub writes: Vec<u8>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockStore {
    pub fn holding(score: u8) -> Self {
        Self {
            value: Some(score),
            ..Self::default()
        }
    }
}

impl HighScoreStore for MockStore {
    fn read_high_score(&self) -> Result<u8, StorageError> {
        if self.fail_reads {
            return Err(StorageError::IoError);
        }
        Ok(self.value.unwrap_or(0))
    }

    fn write_high_score(&mut self, score: u8) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Full);
        }
        self.writes.push(score);
        self.value = Some(score);
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<GameEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn accepted_hits(&self) -> Vec<(Target, u8, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::HitAccepted {
                    target,
                    points,
                    bonus,
                    ..
                } => Some((*target, *points, *bonus)),
                _ => None,
            })
            .collect()
    }

    pub fn rejected_hits(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::HitRejected { .. }))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// Every mock wired to one timeline.
pub struct Rig {
    pub time: Timeline,
    pub hw: MockHardware,
    pub clock: FakeClock,
    pub display: MockDisplay,
    pub store: MockStore,
    pub sink: RecordingSink,
}

impl Rig {
    pub fn new() -> Self {
        let time = Timeline::default();
        Self {
            hw: MockHardware::new(&time),
            clock: FakeClock::new(&time),
            display: MockDisplay::default(),
            store: MockStore::default(),
            sink: RecordingSink::default(),
            time,
        }
    }
}
