//! Port traits — the hexagonal boundary between game logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GameService (domain)
//! ```
//!
//! The Port Access Layer ([`PortAccess`](crate::drivers::port_access::PortAccess))
//! implements [`TargetPort`], [`LedPort`] and [`SelfTestPort`].  Clock,
//! display, event and storage adapters implement the rest.  The
//! [`GameService`](super::service::GameService) consumes them via generics,
//! so the game core never touches hardware directly.

use crate::targets::{Led, SignalState, Target};

// ───────────────────────────────────────────────────────────────
// Target input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port over the start button and the target chain.
pub trait TargetPort {
    /// Raw, undebounced level of the start button.
    fn sample_start_button(&mut self) -> bool;

    /// One full scan of the target chain.  Returns the lowest-indexed target
    /// at the hit level, or `None` when no target is active.
    fn target_hit(&mut self) -> Option<Target>;

    /// Fresh scan; `Enabled` iff this scan yields exactly `target`.
    fn target_state(&mut self, target: Target) -> SignalState {
        SignalState::from(self.target_hit() == Some(target))
    }
}

// ───────────────────────────────────────────────────────────────
// LED output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port over the LED chain.
pub trait LedPort {
    /// Change one LED and commit the whole register.
    fn set_led_state(&mut self, led: Led, state: SignalState);

    /// Blocking all-on / all-off flash test.
    fn flash_leds(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Boot diagnostics port
// ───────────────────────────────────────────────────────────────

/// Setup-only diagnostics offered by the port layer.
pub trait SelfTestPort: TargetPort {
    /// `true` iff every declared input is hardware-configured as an input
    /// and every declared output as an output.
    fn io_set(&mut self) -> bool;

    /// Number of hits [`verify_targets`](Self::verify_targets) waits for.
    fn verify_hits_required(&self) -> u8;

    /// Block until the operator has landed the required number of hits.
    fn verify_targets(&mut self) {
        let mut remaining = self.verify_hits_required();
        log::info!("Target verification: hit {} targets", remaining);
        while remaining > 0 {
            if let Some(target) = self.target_hit() {
                remaining -= 1;
                log::info!("Target verification: {} hit, {} remaining", target, remaining);
            }
        }
        log::info!("Target verification completed");
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter plus a blocking delay.
///
/// The counter wraps at `u32::MAX`; every consumer compares instants with
/// `wrapping_sub`.
pub trait ClockPort {
    fn now_ms(&mut self) -> u32;

    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Display port (external collaborator)
// ───────────────────────────────────────────────────────────────

/// Minimal text display contract.  Layout and fonts are the adapter's concern.
pub trait DisplayPort {
    fn clear(&mut self);

    fn set_cursor(&mut self, x: u8, y: u8);

    fn print(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`GameEvent`](super::events::GameEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::GameEvent);
}

// ───────────────────────────────────────────────────────────────
// High-score storage port (driven adapter: domain ↔ NVS)
// ───────────────────────────────────────────────────────────────

/// The single persisted high-score byte.  `0` means "never set".
///
/// # Durability
///
/// Writes MUST be atomic — no partial writes on power loss.  The ESP-IDF
/// NVS API guarantees this natively.
pub trait HighScoreStore {
    /// Read the stored high score.  A missing slot reads as `Ok(0)`.
    fn read_high_score(&self) -> Result<u8, StorageError>;

    fn write_high_score(&mut self, score: u8) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`GameConfig::validate`](crate::config::GameConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A rule failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

/// Errors from [`HighScoreStore`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
