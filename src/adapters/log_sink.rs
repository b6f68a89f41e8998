//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured game events to the
//! ESP-IDF logger (UART / USB-CDC in production).  The end-of-session
//! report is also written as one JSON line so a host can scrape results.

use log::{info, warn};

use crate::app::events::GameEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`GameEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            GameEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            GameEvent::Checkpoint(checkpoint) => {
                info!("SETUP | {:?} ({})", checkpoint, checkpoint.label());
            }
            GameEvent::BonusChanged { active, elapsed_ms } => {
                info!(
                    "BONUS | {} at {} ms",
                    if *active { "on" } else { "off" },
                    elapsed_ms
                );
            }
            GameEvent::HitAccepted {
                target,
                points,
                score,
                bonus,
            } => {
                info!(
                    "HIT   | {} +{}{} score={}",
                    target,
                    points,
                    if *bonus { " (bonus)" } else { "" },
                    score
                );
            }
            GameEvent::HitRejected {
                target,
                since_last_ms,
            } => {
                info!("HIT   | {} ignored, {} ms since last", target, since_last_ms);
            }
            GameEvent::HighScoreUpdated { previous, new } => {
                info!("HIGH  | {} -> {}", previous, new);
            }
            GameEvent::SessionEnded(report) => match serde_json::to_string(report) {
                Ok(json) => info!("END   | {}", json),
                Err(e) => warn!("END   | report not serialisable: {}", e),
            },
        }
    }
}
