//! Fuzz target: `GameService` poll stream
//!
//! Each input byte pair is one poll: a time step and an input code
//! (nothing, start press, or a hit on one of the twelve targets).
//! Verifies:
//! - No panics for any input sequence or starting clock value
//! - The score never decreases
//! - Once `Ended`, the game stays ended with a frozen score
//!
//! cargo fuzz run fuzz_game_session

#![no_main]

use libfuzzer_sys::fuzz_target;
use lasertarget::app::events::GameEvent;
use lasertarget::app::ports::{
    ClockPort, DisplayPort, EventSink, HighScoreStore, LedPort, SelfTestPort, StorageError,
    TargetPort,
};
use lasertarget::app::service::GameService;
use lasertarget::config::GameConfig;
use lasertarget::fsm::GameState;
use lasertarget::fsm::context::PollInput;
use lasertarget::targets::{Led, SignalState, Target};

struct Quiet;

impl TargetPort for Quiet {
    fn sample_start_button(&mut self) -> bool {
        false
    }
    fn target_hit(&mut self) -> Option<Target> {
        None
    }
}

impl LedPort for Quiet {
    fn set_led_state(&mut self, _led: Led, _state: SignalState) {}
    fn flash_leds(&mut self) {}
}

impl SelfTestPort for Quiet {
    fn io_set(&mut self) -> bool {
        true
    }
    fn verify_hits_required(&self) -> u8 {
        0
    }
}

impl ClockPort for Quiet {
    fn now_ms(&mut self) -> u32 {
        0
    }
    fn delay_ms(&mut self, _ms: u32) {}
}

impl DisplayPort for Quiet {
    fn clear(&mut self) {}
    fn set_cursor(&mut self, _x: u8, _y: u8) {}
    fn print(&mut self, _text: &str) {}
}

impl EventSink for Quiet {
    fn emit(&mut self, _event: &GameEvent) {}
}

struct Slot(u8);

impl HighScoreStore for Slot {
    fn read_high_score(&self) -> Result<u8, StorageError> {
        Ok(self.0)
    }
    fn write_high_score(&mut self, score: u8) -> Result<(), StorageError> {
        self.0 = score;
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    let mut now = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let mut store = Slot(data[4]);

    let mut game = GameService::new(GameConfig::default());
    let (mut hw, mut clock, mut display, mut sink) = (Quiet, Quiet, Quiet, Quiet);
    game.setup(&mut hw, &mut clock, &mut display, &mut sink);

    let mut last_score = 0u8;
    let mut ended_score = None;
    for pair in data[5..].chunks_exact(2) {
        // Steps up to ~1 s keep a 60 s session within reach of short inputs.
        now = now.wrapping_add(u32::from(pair[0]) * 4);
        let input = match pair[1] % 14 {
            0 => PollInput::default(),
            1 => PollInput::start(),
            n => PollInput::hit(Target::from_index(usize::from(n - 2)).unwrap()),
        };
        let state = game.advance(now, input, &mut display, &mut store, &mut sink);

        assert!(game.score() >= last_score, "score went down");
        last_score = game.score();

        if let Some(frozen) = ended_score {
            assert_eq!(state, GameState::Ended, "left the terminal state");
            assert_eq!(game.score(), frozen, "score changed after the end");
        } else if state == GameState::Ended {
            ended_score = Some(game.score());
            assert!(game.report().is_some());
        }
    }
});
