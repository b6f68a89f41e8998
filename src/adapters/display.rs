//! Text display adapter.
//!
//! The board's OLED is driven by an external display driver; this adapter
//! mirrors every screen to the serial log, which is what the firmware uses
//! when no panel driver is linked in.

use heapless::{String, Vec};
use log::{debug, info};

use crate::app::ports::DisplayPort;

const MAX_LINES: usize = 4;
const LINE_CAPACITY: usize = 24;

/// One printed run of text and where it was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedText {
    pub x: u8,
    pub y: u8,
    pub text: String<LINE_CAPACITY>,
}

/// Display that logs each print and keeps the current frame.
#[derive(Default)]
pub struct LogDisplay {
    cursor: (u8, u8),
    frame: Vec<PlacedText, MAX_LINES>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text on screen since the last clear, in print order.
    pub fn frame(&self) -> &[PlacedText] {
        &self.frame
    }
}

impl DisplayPort for LogDisplay {
    fn clear(&mut self) {
        debug!("DISPLAY | clear");
        self.frame.clear();
        self.cursor = (0, 0);
    }

    fn set_cursor(&mut self, x: u8, y: u8) {
        self.cursor = (x, y);
    }

    fn print(&mut self, text: &str) {
        let (x, y) = self.cursor;
        info!("DISPLAY | ({},{}) {}", x, y, text);

        let mut stored = String::new();
        for ch in text.chars() {
            if stored.push(ch).is_err() {
                break;
            }
        }
        // A full frame keeps its first lines; the log still has everything.
        let _ = self.frame.push(PlacedText { x, y, text: stored });
    }
}
