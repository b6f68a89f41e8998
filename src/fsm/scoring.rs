//! Per-target debounce, bonus window, and score accumulation.

use log::{debug, info};

use crate::config::GameConfig;
use crate::targets::Target;

/// Result of evaluating one confirmed target hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Points were added.
    Accepted { points: u8, score: u8, bonus: bool },
    /// Same target hit again inside the cooldown; nothing changed.
    Rejected { since_last_ms: u32 },
}

/// Everything a single hit changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitReport {
    pub target: Target,
    pub elapsed_ms: u32,
    pub outcome: HitOutcome,
    /// New multiplier state if this hit flipped it.
    pub bonus_changed: Option<bool>,
}

impl HitReport {
    pub fn accepted(&self) -> bool {
        matches!(self.outcome, HitOutcome::Accepted { .. })
    }
}

/// Score plus the state needed to judge the next hit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scoreboard {
    score: u8,
    /// `None` until the target's first accepted hit this session.
    last_hit: [Option<u32>; Target::COUNT],
    multiplier_active: bool,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to a fresh session: zero score, no hits, no bonus.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn multiplier_active(&self) -> bool {
        self.multiplier_active
    }

    pub fn last_hit_ms(&self, target: Target) -> Option<u32> {
        self.last_hit[target.index()]
    }

    /// Apply the scoring rules to a hit on `target` observed at `now_ms`,
    /// `elapsed_ms` into the session.
    pub fn register_hit(
        &mut self,
        target: Target,
        now_ms: u32,
        elapsed_ms: u32,
        config: &GameConfig,
    ) -> HitReport {
        let bonus_changed = self.update_multiplier(elapsed_ms, config);

        let outcome = match self.last_hit[target.index()] {
            Some(last) if now_ms.wrapping_sub(last) < config.cooldown_ms => {
                let since_last_ms = now_ms.wrapping_sub(last);
                debug!(
                    "Hit on {} ignored, {} ms since last (cooldown {} ms)",
                    target, since_last_ms, config.cooldown_ms
                );
                HitOutcome::Rejected { since_last_ms }
            }
            _ => {
                self.last_hit[target.index()] = Some(now_ms);
                let bonus = self.multiplier_active;
                let points = config.hit_value(bonus);
                self.score = self.score.saturating_add(points);
                info!(
                    "Hit on {} at {} ms: +{}{} -> {}",
                    target,
                    elapsed_ms,
                    points,
                    if bonus { " (bonus)" } else { "" },
                    self.score
                );
                HitOutcome::Accepted {
                    points,
                    score: self.score,
                    bonus,
                }
            }
        };

        HitReport {
            target,
            elapsed_ms,
            outcome,
            bonus_changed,
        }
    }

    /// The flag is only looked at when a hit arrives, so both edges are
    /// detected lazily here.  On first, then off, in that order: a hit past
    /// the window end always leaves the flag clear.
    fn update_multiplier(&mut self, elapsed_ms: u32, config: &GameConfig) -> Option<bool> {
        let before = self.multiplier_active;
        if !self.multiplier_active && elapsed_ms >= config.bonus_start_ms {
            self.multiplier_active = true;
        }
        if self.multiplier_active && elapsed_ms >= config.bonus_end_ms {
            self.multiplier_active = false;
        }
        (self.multiplier_active != before).then_some(self.multiplier_active)
    }
}
