//! Bit-banged shift-register chains.
//!
//! ## Target chain (74HC165, parallel-in / serial-out)
//!
//! 1. Pulse the latch LOW→HIGH: every target line is captured at once.
//! 2. The bit for position 0 is now on the data line.  Read it, then pulse
//!    the clock to expose the next position.  Reading happens **before** the
//!    clock pulse; clocking advances to the next bit.
//! 3. Stop at the first position at the hit level.  Hits on higher positions
//!    in the same capture are never seen.
//!
//! ## LED chain (74HC595, serial-in / parallel-out)
//!
//! 1. Hold the latch LOW for the whole burst so the outputs keep showing the
//!    previous vector.
//! 2. Shift every bit from the highest LED index down to index 0: clock LOW,
//!    set data, clock HIGH.
//! 3. Drive the latch HIGH once; all outputs change together.

use embedded_hal::digital::{Error as _, InputPin, OutputPin, PinState};

use crate::error::PinError;
use crate::targets::{LedRegister, Target};

/// Anything that can capture the target lines and report the first hit.
pub trait HitScanner {
    fn scan(&mut self) -> Result<Option<Target>, PinError>;
}

/// Anything that can push a full LED vector to the output latches.
pub trait LedLatch {
    fn commit(&mut self, register: &LedRegister) -> Result<(), PinError>;
}

// ---------------------------------------------------------------------------
// Target chain
// ---------------------------------------------------------------------------

pub struct TargetChain<D, C, L> {
    data: D,
    clock: C,
    latch: L,
}

impl<D, C, L> TargetChain<D, C, L>
where
    D: InputPin,
    C: OutputPin,
    L: OutputPin,
{
    pub fn new(data: D, clock: C, latch: L) -> Self {
        Self { data, clock, latch }
    }

    fn capture(&mut self) -> Result<(), PinError> {
        self.latch
            .set_low()
            .map_err(|e| PinError::TargetControl(e.kind()))?;
        self.latch
            .set_high()
            .map_err(|e| PinError::TargetControl(e.kind()))
    }

    fn advance(&mut self) -> Result<(), PinError> {
        self.clock
            .set_high()
            .map_err(|e| PinError::TargetControl(e.kind()))?;
        self.clock
            .set_low()
            .map_err(|e| PinError::TargetControl(e.kind()))
    }
}

impl<D, C, L> HitScanner for TargetChain<D, C, L>
where
    D: InputPin,
    C: OutputPin,
    L: OutputPin,
{
    fn scan(&mut self) -> Result<Option<Target>, PinError> {
        self.capture()?;

        // LSB -> MSB.
        for target in Target::ALL {
            let hit = self
                .data
                .is_high()
                .map_err(|e| PinError::TargetData(e.kind()))?;
            if hit {
                return Ok(Some(target));
            }
            self.advance()?;
        }

        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// LED chain
// ---------------------------------------------------------------------------

pub struct LedChain<D, C, L> {
    data: D,
    clock: C,
    latch: L,
}

impl<D, C, L> LedChain<D, C, L>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
{
    pub fn new(data: D, clock: C, latch: L) -> Self {
        Self { data, clock, latch }
    }
}

impl<D, C, L> LedLatch for LedChain<D, C, L>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
{
    fn commit(&mut self, register: &LedRegister) -> Result<(), PinError> {
        self.latch
            .set_low()
            .map_err(|e| PinError::LedChain(e.kind()))?;

        // MSB -> LSB, so index 0 lands on Q0 of the first register.
        for state in register.states().iter().rev() {
            self.clock
                .set_low()
                .map_err(|e| PinError::LedChain(e.kind()))?;
            self.data
                .set_state(PinState::from(state.is_enabled()))
                .map_err(|e| PinError::LedChain(e.kind()))?;
            self.clock
                .set_high()
                .map_err(|e| PinError::LedChain(e.kind()))?;
        }

        self.latch
            .set_high()
            .map_err(|e| PinError::LedChain(e.kind()))
    }
}
