//! Unified error types for the LaserTarget firmware.
//!
//! A single `Error` enum that every subsystem can convert into.  All
//! variants are `Copy` so they pass through the port layer and the game
//! service without allocation.

use core::fmt;

use embedded_hal::digital::ErrorKind;

use crate::app::ports::StorageError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO read or write on a shift-register chain failed.
    Pin(PinError),
    /// The non-volatile high-score slot could not be accessed.
    Storage(StorageError),
    /// A session was requested before setup finished.
    NotReady,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "pin: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::NotReady => write!(f, "game setup has not completed"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Pin errors
// ---------------------------------------------------------------------------

/// Which line of which chain failed, plus the HAL's error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    /// Data input of the target chain.
    TargetData(ErrorKind),
    /// Clock or latch output of the target chain.
    TargetControl(ErrorKind),
    /// Data, clock or latch output of the LED chain.
    LedChain(ErrorKind),
    /// Start-button input.
    StartButton(ErrorKind),
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetData(k) => write!(f, "target data read failed ({k:?})"),
            Self::TargetControl(k) => write!(f, "target clock/latch write failed ({k:?})"),
            Self::LedChain(k) => write!(f, "LED chain write failed ({k:?})"),
            Self::StartButton(k) => write!(f, "start button read failed ({k:?})"),
        }
    }
}

impl From<PinError> for Error {
    fn from(e: PinError) -> Self {
        Self::Pin(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
