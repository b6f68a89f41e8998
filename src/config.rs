//! Game rule and port timing constants.
//!
//! The rule set is fixed at build time; [`GameConfig::default`] carries the
//! documented values and [`GameConfig::validate`] rejects combinations that
//! would make a session meaningless.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Points awarded for an accepted hit outside the bonus window.
pub const DEFAULT_TARGET_VALUE: u8 = 5;
/// Factor applied to [`DEFAULT_TARGET_VALUE`] inside the bonus window.
pub const DEFAULT_POINT_MULTIPLIER: u8 = 2;

/// Scoring and timing rules for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    // --- Session ---
    /// Length of a play session (milliseconds).
    pub session_duration_ms: u32,
    /// Minimum score for a win.
    pub win_threshold: u8,

    // --- Scoring ---
    /// Points per accepted hit.
    pub target_value: u8,
    /// Multiplier applied while the bonus window is active.
    pub point_multiplier: u8,
    /// Bonus window start, relative to session start (milliseconds).
    pub bonus_start_ms: u32,
    /// Bonus window end (exclusive), relative to session start (milliseconds).
    pub bonus_end_ms: u32,
    /// Minimum time between two accepted hits on the same target (milliseconds).
    pub cooldown_ms: u32,

    // --- Setup ---
    /// How long each setup checkpoint stays on the display (milliseconds).
    pub checkpoint_hold_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Session
            session_duration_ms: 60_000, // 1 min
            win_threshold: 25,

            // Scoring
            target_value: DEFAULT_TARGET_VALUE,
            point_multiplier: DEFAULT_POINT_MULTIPLIER,
            bonus_start_ms: 40_000,
            bonus_end_ms: 50_000,
            cooldown_ms: 3_000,

            // Setup
            checkpoint_hold_ms: 500,
        }
    }
}

impl GameConfig {
    /// Range-check the rule set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_duration_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "session_duration_ms must be > 0",
            ));
        }
        if self.bonus_start_ms >= self.bonus_end_ms {
            return Err(ConfigError::ValidationFailed(
                "bonus_start_ms must be < bonus_end_ms",
            ));
        }
        if self.bonus_end_ms > self.session_duration_ms {
            return Err(ConfigError::ValidationFailed(
                "bonus window must end within the session",
            ));
        }
        if self.target_value == 0 {
            return Err(ConfigError::ValidationFailed("target_value must be > 0"));
        }
        if self.point_multiplier == 0 {
            return Err(ConfigError::ValidationFailed(
                "point_multiplier must be > 0",
            ));
        }
        if self.target_value.checked_mul(self.point_multiplier).is_none() {
            return Err(ConfigError::ValidationFailed(
                "target_value * point_multiplier must fit in a byte",
            ));
        }
        if self.cooldown_ms >= self.session_duration_ms {
            return Err(ConfigError::ValidationFailed(
                "cooldown_ms must be shorter than the session",
            ));
        }
        Ok(())
    }

    /// Whether the scoring values are the documented defaults.  Checked
    /// during setup before a session may start.
    pub fn has_default_scoring(&self) -> bool {
        self.target_value == DEFAULT_TARGET_VALUE
            && self.point_multiplier == DEFAULT_POINT_MULTIPLIER
    }

    /// Points for one accepted hit.
    pub fn hit_value(&self, bonus: bool) -> u8 {
        if bonus {
            self.target_value.saturating_mul(self.point_multiplier)
        } else {
            self.target_value
        }
    }
}

/// Port Access Layer timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortTiming {
    /// Wait after a scan that found no hit, lets the chain settle (milliseconds).
    pub post_scan_guard_ms: u32,
    /// Number of on/off cycles in the LED flash test.
    pub flash_cycles: u8,
    /// Hold time for each on and each off phase of the flash test (milliseconds).
    pub flash_hold_ms: u32,
    /// Hits the operator must land before target verification completes.
    pub verify_hits_required: u8,
}

impl Default for PortTiming {
    fn default() -> Self {
        Self {
            post_scan_guard_ms: 10,
            flash_cycles: 3,
            flash_hold_ms: 250,
            verify_hits_required: 5,
        }
    }
}
