//! Target and LED identifiers, signal states, and the cached LED register.
//!
//! Targets and LEDs are closed enumerations of identical cardinality.  The
//! ordinal of a [`Target`] is its bit position in the input chain and the
//! ordinal of its paired [`Led`] is its bit position in the output chain, so
//! `LED[i]` always sits next to `Target[i]` on the board.
//!
//! "No target this cycle" is expressed as `Option::<Target>::None`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One physical sensor position a player can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Target {
    T1 = 0,
    T2 = 1,
    T3 = 2,
    T4 = 3,
    T5 = 4,
    T6 = 5,
    T7 = 6,
    T8 = 7,
    T9 = 8,
    T10 = 9,
    T11 = 10,
    T12 = 11,
}

impl Target {
    /// Number of targets — sizes every per-target table.
    pub const COUNT: usize = 12;

    /// All targets in shift order (index 0 is the first bit out of the chain).
    pub const ALL: [Target; Self::COUNT] = [
        Self::T1,
        Self::T2,
        Self::T3,
        Self::T4,
        Self::T5,
        Self::T6,
        Self::T7,
        Self::T8,
        Self::T9,
        Self::T10,
        Self::T11,
        Self::T12,
    ];

    /// Target at chain position `idx`, or `None` past the end of the chain.
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The indicator LED mounted next to this target.
    pub const fn led(self) -> Led {
        Led::ALL[self.index()]
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.index() + 1)
    }
}

/// One physical indicator light, index-paired with a [`Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Led {
    L1 = 0,
    L2 = 1,
    L3 = 2,
    L4 = 3,
    L5 = 4,
    L6 = 5,
    L7 = 6,
    L8 = 7,
    L9 = 8,
    L10 = 9,
    L11 = 10,
    L12 = 11,
}

impl Led {
    pub const COUNT: usize = Target::COUNT;

    pub const ALL: [Led; Self::COUNT] = [
        Self::L1,
        Self::L2,
        Self::L3,
        Self::L4,
        Self::L5,
        Self::L6,
        Self::L7,
        Self::L8,
        Self::L9,
        Self::L10,
        Self::L11,
        Self::L12,
    ];

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The target this LED indicates.
    pub const fn target(self) -> Target {
        Target::ALL[self.index()]
    }
}

// Index correspondence is a hard invariant of the board layout.
const _: () = assert!(Target::COUNT == Led::COUNT);

/// Two-valued state used for LED drive values and sampled input meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignalState {
    #[default]
    Disabled,
    Enabled,
}

impl SignalState {
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for SignalState {
    fn from(level: bool) -> Self {
        if level { Self::Enabled } else { Self::Disabled }
    }
}

/// Cached copy of what the LED latches currently show.
///
/// Index `i` drives [`Led::ALL[i]`](Led::ALL).  The register is rewritten in
/// full on every commit; this copy lets a single light change without
/// reading anything back from the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedRegister {
    states: [SignalState; Led::COUNT],
}

impl LedRegister {
    /// All LEDs disabled.
    pub const fn new() -> Self {
        Self {
            states: [SignalState::Disabled; Led::COUNT],
        }
    }

    pub fn get(&self, led: Led) -> SignalState {
        self.states[led.index()]
    }

    pub fn set(&mut self, led: Led, state: SignalState) {
        self.states[led.index()] = state;
    }

    pub fn fill(&mut self, state: SignalState) {
        self.states = [state; Led::COUNT];
    }

    /// States in index order (LSB first).
    pub fn states(&self) -> &[SignalState; Led::COUNT] {
        &self.states
    }

    /// Number of lit LEDs.
    pub fn lit(&self) -> usize {
        self.states.iter().filter(|s| s.is_enabled()).count()
    }
}
