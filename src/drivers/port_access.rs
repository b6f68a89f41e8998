//! Port Access Layer — many logical signals over a handful of pins.
//!
//! [`PortAccess`] owns every piece of physical pin state: the target chain,
//! the LED chain with its cached [`LedRegister`], the start button, and the
//! direction probe used by the boot-time I/O check.  It implements the
//! [`TargetPort`], [`LedPort`] and [`SelfTestPort`] traits the game service
//! consumes.
//!
//! Pin faults never reach the game: a failed scan reads as "no hit", a
//! failed commit leaves the cached register updated so the next commit
//! repairs the latches.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, InputPin};
use log::{info, warn};

use super::shift_register::{HitScanner, LedLatch};
use crate::app::ports::{LedPort, SelfTestPort, TargetPort};
use crate::config::PortTiming;
use crate::error::PinError;
use crate::pins;
use crate::targets::{Led, LedRegister, SignalState, Target};

/// Reports how a GPIO is configured at the hardware level.
pub trait DirectionProbe {
    /// `true` if the pin's output driver is enabled.
    fn is_output(&self, gpio: i32) -> bool;
}

/// The GPIOs the firmware promises to read and to drive.
#[derive(Debug, Clone, Copy)]
pub struct PinLayout {
    pub inputs: &'static [i32],
    pub outputs: &'static [i32],
}

impl Default for PinLayout {
    fn default() -> Self {
        Self {
            inputs: &pins::INPUT_PINS,
            outputs: &pins::OUTPUT_PINS,
        }
    }
}

pub struct PortAccess<S, O, B, P, D> {
    targets: S,
    leds: O,
    start_button: B,
    probe: P,
    delay: D,
    register: LedRegister,
    layout: PinLayout,
    timing: PortTiming,
}

impl<S, O, B, P, D> PortAccess<S, O, B, P, D>
where
    S: HitScanner,
    O: LedLatch,
    B: InputPin,
    P: DirectionProbe,
    D: DelayNs,
{
    /// Take ownership of both chains and the button.  All LEDs are driven
    /// dark so the latches match the cached register.
    pub fn new(
        targets: S,
        leds: O,
        start_button: B,
        probe: P,
        delay: D,
        layout: PinLayout,
        timing: PortTiming,
    ) -> Self {
        let mut port = Self {
            targets,
            leds,
            start_button,
            probe,
            delay,
            register: LedRegister::new(),
            layout,
            timing,
        };
        port.commit_leds();
        port
    }

    /// Cached LED vector (what the latches show after the last good commit).
    pub fn led_register(&self) -> &LedRegister {
        &self.register
    }

    fn commit_leds(&mut self) {
        if let Err(e) = self.leds.commit(&self.register) {
            warn!("LED commit failed: {}", e);
        }
    }
}

// ── TargetPort implementation ─────────────────────────────────

impl<S, O, B, P, D> TargetPort for PortAccess<S, O, B, P, D>
where
    S: HitScanner,
    O: LedLatch,
    B: InputPin,
    P: DirectionProbe,
    D: DelayNs,
{
    fn sample_start_button(&mut self) -> bool {
        match self.start_button.is_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("{}", PinError::StartButton(e.kind()));
                false
            }
        }
    }

    fn target_hit(&mut self) -> Option<Target> {
        match self.targets.scan() {
            Ok(Some(target)) => Some(target),
            Ok(None) => {
                // Let the chain settle before the next capture.
                self.delay.delay_ms(self.timing.post_scan_guard_ms);
                None
            }
            Err(e) => {
                warn!("Target scan failed: {}", e);
                self.delay.delay_ms(self.timing.post_scan_guard_ms);
                None
            }
        }
    }
}

// ── LedPort implementation ────────────────────────────────────

impl<S, O, B, P, D> LedPort for PortAccess<S, O, B, P, D>
where
    S: HitScanner,
    O: LedLatch,
    B: InputPin,
    P: DirectionProbe,
    D: DelayNs,
{
    fn set_led_state(&mut self, led: Led, state: SignalState) {
        self.register.set(led, state);
        self.commit_leds();
    }

    fn flash_leds(&mut self) {
        info!(
            "LED verification: all LEDs should flash {} times",
            self.timing.flash_cycles
        );
        for cycle in 0..self.timing.flash_cycles {
            self.register.fill(SignalState::Enabled);
            self.commit_leds();
            self.delay.delay_ms(self.timing.flash_hold_ms);

            self.register.fill(SignalState::Disabled);
            self.commit_leds();
            self.delay.delay_ms(self.timing.flash_hold_ms);

            info!("Flash count: {}", cycle + 1);
        }
    }
}

// ── SelfTestPort implementation ───────────────────────────────

impl<S, O, B, P, D> SelfTestPort for PortAccess<S, O, B, P, D>
where
    S: HitScanner,
    O: LedLatch,
    B: InputPin,
    P: DirectionProbe,
    D: DelayNs,
{
    fn io_set(&mut self) -> bool {
        info!("Port config verification");

        if let Some(gpio) = self
            .layout
            .inputs
            .iter()
            .find(|gpio| self.probe.is_output(**gpio))
        {
            warn!("GPIO {} is declared as input but configured as output", gpio);
            return false;
        }
        info!("Input ports correctly configured");

        if let Some(gpio) = self
            .layout
            .outputs
            .iter()
            .find(|gpio| !self.probe.is_output(**gpio))
        {
            warn!("GPIO {} is declared as output but configured as input", gpio);
            return false;
        }
        info!("Output ports correctly configured");

        true
    }

    fn verify_hits_required(&self) -> u8 {
        self.timing.verify_hits_required
    }
}
