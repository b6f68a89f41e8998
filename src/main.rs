//! LaserTarget Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  PortAccess         LogEventSink   NvsHighScoreStore           │
//! │  (Target+Led+Self)  (EventSink)    (HighScoreStore)            │
//! │  SystemClock        LogDisplay     RegisterDirectionProbe      │
//! │  (ClockPort)        (DisplayPort)  (DirectionProbe)            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │             GameService (pure logic)                   │    │
//! │  │  FSM · Scoreboard · Session                            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use lasertarget::adapters::display::LogDisplay;
use lasertarget::adapters::gpio_direction::RegisterDirectionProbe;
use lasertarget::adapters::log_sink::LogEventSink;
use lasertarget::adapters::nvs::NvsHighScoreStore;
use lasertarget::adapters::time::SystemClock;
use lasertarget::app::service::GameService;
use lasertarget::config::{GameConfig, PortTiming};
use lasertarget::drivers::port_access::{PinLayout, PortAccess};
use lasertarget::drivers::shift_register::{LedChain, TargetChain};
use lasertarget::error::Error;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  LaserTarget v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Pins (numbers must match `pins.rs`) ────────────────
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    let targets = TargetChain::new(
        PinDriver::input(pins.gpio4)?,
        PinDriver::output(pins.gpio5)?,
        PinDriver::output(pins.gpio6)?,
    );
    let leds = LedChain::new(
        PinDriver::output(pins.gpio7)?,
        PinDriver::output(pins.gpio15)?,
        PinDriver::output(pins.gpio16)?,
    );
    let start_button = PinDriver::input(pins.gpio17)?;

    let mut port = PortAccess::new(
        targets,
        leds,
        start_button,
        RegisterDirectionProbe::new(),
        FreeRtos,
        PinLayout::default(),
        PortTiming::default(),
    );

    // ── 3. Adapters ───────────────────────────────────────────
    let mut store = NvsHighScoreStore::new().map_err(Error::from)?;
    let mut clock = SystemClock::new();
    let mut display = LogDisplay::new();
    let mut sink = LogEventSink::new();

    // ── 4. Setup, then one session ────────────────────────────
    let mut game = GameService::new(GameConfig::default());
    if !game.setup(&mut port, &mut clock, &mut display, &mut sink) {
        warn!("Self-test reported a problem, playing anyway");
    }

    let report = game.run_session(&mut port, &mut clock, &mut display, &mut store, &mut sink)?;
    info!(
        "Result: {:?}, score {}, high score {}{}",
        report.outcome,
        report.score,
        report.high_score,
        if report.new_high_score { " (new!)" } else { "" }
    );

    // ── 5. Hold the final screen until reset ──────────────────
    info!("Session complete, reset the board to play again");
    loop {
        FreeRtos::delay_ms(1_000);
    }
}
