//! GPIO / peripheral pin assignments for the LaserTarget main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Two independent shift-register chains hang off the MCU:
//!
//! ```text
//!  targets ──▶ 2× 74HC165 (PISO) ──data──▶ MCU ◀──clock/latch──
//!  MCU ──data/clock/latch──▶ 2× 74HC595 (SIPO) ──▶ LEDs
//! ```

// ---------------------------------------------------------------------------
// Target chain (74HC165 parallel-in / serial-out)
// ---------------------------------------------------------------------------

/// Digital input: serial output (QH) of the last 74HC165 in the chain.
pub const TARGETS_DATA_GPIO: i32 = 4;
/// Digital output: CLK, each rising edge exposes the next bit on QH.
pub const TARGETS_CLOCK_GPIO: i32 = 5;
/// Digital output: SH/LD, LOW captures all parallel lines, HIGH shifts.
pub const TARGETS_LATCH_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// LED chain (74HC595 serial-in / parallel-out)
// ---------------------------------------------------------------------------

/// Digital output: DS serial data into the first 74HC595.
pub const LEDS_DATA_GPIO: i32 = 7;
/// Digital output: SH_CP shift clock.
pub const LEDS_CLOCK_GPIO: i32 = 15;
/// Digital output: ST_CP storage latch, rising edge commits the outputs.
pub const LEDS_LATCH_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Start button (active-high, external pull-down)
// ---------------------------------------------------------------------------

/// Momentary push-button that starts a session.
pub const START_BUTTON_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Declared directions (checked at boot by the I/O self-test)
// ---------------------------------------------------------------------------

/// Every pin the firmware reads.
pub const INPUT_PINS: [i32; 2] = [TARGETS_DATA_GPIO, START_BUTTON_GPIO];

/// Every pin the firmware drives.
pub const OUTPUT_PINS: [i32; 5] = [
    LEDS_DATA_GPIO,
    LEDS_CLOCK_GPIO,
    LEDS_LATCH_GPIO,
    TARGETS_CLOCK_GPIO,
    TARGETS_LATCH_GPIO,
];

// ---------------------------------------------------------------------------
// GPIO matrix registers (ESP32-S3 TRM §6.14)
// ---------------------------------------------------------------------------

/// Output-enable bits for GPIO 0–31.
pub const GPIO_ENABLE_REG: usize = 0x6000_4020;
/// Output-enable bits for GPIO 32–48.
pub const GPIO_ENABLE1_REG: usize = 0x6000_402C;
