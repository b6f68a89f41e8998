//! Full sessions through `GameService` against the mock adapters.

use lasertarget::app::events::{GameEvent, SessionReport};
use lasertarget::app::service::GameService;
use lasertarget::config::GameConfig;
use lasertarget::error::Error;
use lasertarget::fsm::GameState;
use lasertarget::fsm::context::Outcome;
use lasertarget::fsm::session::Session;
use lasertarget::targets::Target;

use super::mock_hw::Rig;

/// Setup finishes at 2500 ms; the player presses start at 3000 ms.
const START: u32 = 3_000;

fn at(elapsed_ms: u32) -> u32 {
    START.wrapping_add(elapsed_ms)
}

fn ready() -> (GameService, Rig) {
    let mut rig = Rig::new();
    let mut game = GameService::new(GameConfig::default());
    assert!(game.setup(&mut rig.hw, &mut rig.clock, &mut rig.display, &mut rig.sink));
    rig.hw.press_start_at(START);
    (game, rig)
}

fn play(game: &mut GameService, rig: &mut Rig) -> SessionReport {
    game.run_session(
        &mut rig.hw,
        &mut rig.clock,
        &mut rig.display,
        &mut rig.store,
        &mut rig.sink,
    )
    .expect("session should run after setup")
}

#[test]
fn worked_example_scores_thirty_and_wins() {
    let (mut game, mut rig) = ready();
    rig.hw.pulse(Target::T1, at(1_000));
    rig.hw.pulse(Target::T2, at(5_000));
    rig.hw.pulse(Target::T3, at(45_000));
    rig.hw.pulse(Target::T3, at(46_000));
    rig.hw.pulse(Target::T4, at(48_000));

    let report = play(&mut game, &mut rig);

    assert_eq!(
        report,
        SessionReport {
            outcome: Outcome::Win,
            score: 30,
            high_score: 30,
            new_high_score: true,
        }
    );
    assert_eq!(
        rig.sink.accepted_hits(),
        [
            (Target::T1, 5, false),
            (Target::T2, 5, false),
            (Target::T3, 10, true),
            (Target::T4, 10, true),
        ]
    );
    assert!(rig.sink.rejected_hits() > 0);
    assert_eq!(game.session(), Session::Ended { start_ms: START });
    assert_eq!(rig.store.writes, [30]);
    assert!(rig.sink.events.contains(&GameEvent::HighScoreUpdated {
        previous: 0,
        new: 30
    }));
    assert_eq!(rig.sink.events.last(), Some(&GameEvent::SessionEnded(report)));
    assert_eq!(rig.display.frame, ["YOU WIN!", "SCORE 30 HI 30"]);
}

#[test]
fn session_lasts_sixty_seconds() {
    let (mut game, mut rig) = ready();
    play(&mut game, &mut rig);

    let elapsed = rig.time.now().wrapping_sub(START);
    assert!(
        (60_000..60_000 + 12).contains(&elapsed),
        "ended {} ms after start",
        elapsed
    );
    assert_eq!(game.state(), GameState::Ended);
}

#[test]
fn below_threshold_loses_and_keeps_better_record() {
    let (mut game, mut rig) = ready();
    rig.store.value = Some(40);
    rig.hw.pulse(Target::T8, at(10_000));

    let report = play(&mut game, &mut rig);

    assert_eq!(report.outcome, Outcome::Lose);
    assert_eq!(report.score, 5);
    assert_eq!(report.high_score, 40);
    assert!(!report.new_high_score);
    assert!(rig.store.writes.is_empty());
    assert_eq!(rig.display.frame, ["GAME OVER", "SCORE 5 HI 40"]);
}

#[test]
fn threshold_score_wins_and_beats_record() {
    let (mut game, mut rig) = ready();
    rig.store.value = Some(20);
    for (i, target) in Target::ALL.iter().take(5).enumerate() {
        rig.hw.pulse(*target, at(1_000 * (i as u32 + 1)));
    }

    let report = play(&mut game, &mut rig);

    assert_eq!(report.outcome, Outcome::Win);
    assert_eq!(report.score, 25);
    assert_eq!(rig.store.writes, [25]);
    assert!(rig.sink.events.contains(&GameEvent::HighScoreUpdated {
        previous: 20,
        new: 25
    }));
}

#[test]
fn held_target_scores_once_per_cooldown() {
    let (mut game, mut rig) = ready();
    rig.hw.pulse_for(Target::T6, at(1_000), 7_000);
    let clears_before = rig.display.clears;
    let printed_before = rig.display.printed.len();

    let report = play(&mut game, &mut rig);

    assert_eq!(rig.sink.accepted_hits().len(), 3);
    assert!(rig.sink.rejected_hits() > 0);
    assert_eq!(report.score, 15);
    // Session start, three accepted hits, end screen; rejections draw nothing.
    assert_eq!(rig.display.clears - clears_before, 5);
    assert_eq!(
        rig.display.printed[printed_before..],
        ["SCORE 0", "SCORE 5", "SCORE 10", "SCORE 15", "GAME OVER", "SCORE 15 HI 15"]
    );
}

#[test]
fn bonus_switches_on_and_off_with_hits() {
    let (mut game, mut rig) = ready();
    rig.hw.pulse(Target::T1, at(45_000));
    rig.hw.pulse(Target::T2, at(55_000));

    let report = play(&mut game, &mut rig);

    assert_eq!(
        rig.sink.accepted_hits(),
        [(Target::T1, 10, true), (Target::T2, 5, false)]
    );
    let bonus: Vec<bool> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::BonusChanged { active, .. } => Some(*active),
            _ => None,
        })
        .collect();
    assert_eq!(bonus, [true, false]);
    assert_eq!(report.score, 15);
    assert!(!game.multiplier_active());
}

#[test]
fn hits_outside_the_session_are_ignored() {
    let (mut game, mut rig) = ready();
    rig.hw.pulse(Target::T1, START - 300);
    rig.hw.pulse(Target::T2, at(60_000));

    let report = play(&mut game, &mut rig);

    assert_eq!(report.score, 0);
    assert!(rig.sink.accepted_hits().is_empty());
    assert_eq!(report.outcome, Outcome::Lose);
}

#[test]
fn start_button_is_only_read_while_awaiting() {
    let (mut game, mut rig) = ready();
    play(&mut game, &mut rig);
    // One sample per millisecond from 2500 ms up to and including 3000 ms.
    assert_eq!(rig.hw.button_samples, 501);
}

#[test]
fn ended_game_stays_ended() {
    let (mut game, mut rig) = ready();
    rig.hw.pulse(Target::T1, at(2_000));
    let report = play(&mut game, &mut rig);
    let scans = rig.hw.scans;
    let samples = rig.hw.button_samples;

    rig.hw.pulse(Target::T2, rig.time.now());
    for _ in 0..10 {
        let state = game.poll(
            &mut rig.hw,
            &mut rig.clock,
            &mut rig.display,
            &mut rig.store,
            &mut rig.sink,
        );
        assert_eq!(state, GameState::Ended);
    }

    assert_eq!(rig.hw.scans, scans);
    assert_eq!(rig.hw.button_samples, samples);
    assert!(game.is_complete());
    assert_eq!(play(&mut game, &mut rig), report);
    assert_eq!(rig.store.writes.len(), 1);
}

#[test]
fn session_requires_setup() {
    let mut rig = Rig::new();
    let mut game = GameService::new(GameConfig::default());
    let result = game.run_session(
        &mut rig.hw,
        &mut rig.clock,
        &mut rig.display,
        &mut rig.store,
        &mut rig.sink,
    );
    assert_eq!(result, Err(Error::NotReady));
    assert_eq!(rig.hw.button_samples, 0);
}

#[test]
fn storage_write_failure_still_reports_result() {
    let (mut game, mut rig) = ready();
    rig.store.fail_writes = true;
    rig.hw.pulse(Target::T1, at(1_000));

    let report = play(&mut game, &mut rig);

    assert_eq!(report.score, 5);
    assert_eq!(report.high_score, 0);
    assert!(!report.new_high_score);
}

#[test]
fn storage_read_failure_leaves_record_alone() {
    let (mut game, mut rig) = ready();
    rig.store.fail_reads = true;
    rig.hw.pulse(Target::T1, at(1_000));

    let report = play(&mut game, &mut rig);

    assert!(rig.store.writes.is_empty());
    assert!(!report.new_high_score);
}

#[test]
fn session_spanning_counter_wrap() {
    let mut rig = Rig::new();
    rig.time.set(u32::MAX - 30_000);
    let mut game = GameService::new(GameConfig::default());
    assert!(game.setup(&mut rig.hw, &mut rig.clock, &mut rig.display, &mut rig.sink));

    let start = rig.time.now();
    rig.hw.press_start_at(0);
    rig.hw.pulse(Target::T9, start.wrapping_add(45_000));

    let report = play(&mut game, &mut rig);

    assert_eq!(game.session(), Session::Ended { start_ms: start });
    assert_eq!(rig.sink.accepted_hits(), [(Target::T9, 10, true)]);
    assert_eq!(report.score, 10);
    let elapsed = rig.time.now().wrapping_sub(start);
    assert!((60_000..60_000 + 12).contains(&elapsed));
}
