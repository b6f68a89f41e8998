//! Test-only simulation of the board's shift-register chains.
//!
//! A [`SimBus`] models two 16-bit chains (2× 74HC165 in, 2× 74HC595 out)
//! and a start button.  [`SimPin`] handles implement the `embedded-hal`
//! digital traits so the real bit-bang drivers run against it unchanged.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use super::port_access::DirectionProbe;
use crate::targets::{Led, Target};

const CHAIN_BITS: usize = 16;
const LINES: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    TargetData,
    TargetClock,
    TargetLatch,
    LedData,
    LedClock,
    LedLatch,
    StartButton,
}

#[derive(Default)]
struct BusState {
    levels: [bool; LINES],
    rising: [usize; LINES],
    failing: Option<Line>,
    history: Vec<(Line, bool)>,

    // 74HC165
    target_lines: [bool; CHAIN_BITS],
    captured: [bool; CHAIN_BITS],
    read_pos: usize,

    // 74HC595
    stage: [bool; CHAIN_BITS],
    outputs: [bool; CHAIN_BITS],
    output_changes: usize,
}

#[derive(Clone, Default)]
pub struct SimBus(Rc<RefCell<BusState>>);

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, line: Line) -> SimPin {
        SimPin {
            bus: self.clone(),
            line,
        }
    }

    pub fn set_target(&self, target: Target, active: bool) {
        self.set_position(target.index(), active);
    }

    pub fn set_position(&self, pos: usize, active: bool) {
        self.0.borrow_mut().target_lines[pos] = active;
    }

    pub fn set_start_button(&self, pressed: bool) {
        self.0.borrow_mut().levels[Line::StartButton as usize] = pressed;
    }

    pub fn fail_line(&self, line: Line) {
        self.0.borrow_mut().failing = Some(line);
    }

    pub fn rising_edges(&self, line: Line) -> usize {
        self.0.borrow().rising[line as usize]
    }

    pub fn led_output(&self, led: Led) -> bool {
        self.0.borrow().outputs[led.index()]
    }

    pub fn output_changes(&self) -> usize {
        self.0.borrow().output_changes
    }

    pub fn history(&self) -> Vec<(Line, bool)> {
        self.0.borrow().history.clone()
    }

    pub fn clear_history(&self) {
        let mut s = self.0.borrow_mut();
        s.history.clear();
        s.rising = [0; LINES];
        s.output_changes = 0;
    }

    fn drive(&self, line: Line, level: bool) -> Result<(), SimPinError> {
        let mut guard = self.0.borrow_mut();
        let s = &mut *guard;
        if s.failing == Some(line) {
            return Err(SimPinError);
        }
        let prev = s.levels[line as usize];
        s.levels[line as usize] = level;
        s.history.push((line, level));

        // SH/LD low loads the parallel inputs.
        if line == Line::TargetLatch && !level {
            s.captured = s.target_lines;
            s.read_pos = 0;
        }

        if !prev && level {
            s.rising[line as usize] += 1;
            match line {
                Line::TargetClock => s.read_pos += 1,
                Line::LedClock => {
                    let bit = s.levels[Line::LedData as usize];
                    s.stage.copy_within(0..CHAIN_BITS - 1, 1);
                    s.stage[0] = bit;
                }
                Line::LedLatch => {
                    if s.outputs != s.stage {
                        s.output_changes += 1;
                    }
                    s.outputs = s.stage;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn sense(&self, line: Line) -> Result<bool, SimPinError> {
        let s = self.0.borrow();
        if s.failing == Some(line) {
            return Err(SimPinError);
        }
        Ok(match line {
            Line::TargetData => s.captured.get(s.read_pos).copied().unwrap_or(false),
            other => s.levels[other as usize],
        })
    }
}

#[derive(Debug)]
pub struct SimPinError;

impl embedded_hal::digital::Error for SimPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct SimPin {
    bus: SimBus,
    line: Line,
}

impl ErrorType for SimPin {
    type Error = SimPinError;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.bus.drive(self.line, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.bus.drive(self.line, true)
    }
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.bus.sense(self.line)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.bus.sense(self.line).map(|level| !level)
    }
}

/// Delay that only counts.
#[derive(Clone, Default)]
pub struct SimDelay(Rc<Cell<u64>>);

impl SimDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.set(self.0.get() + u64::from(ns));
    }
}

/// Direction probe backed by a list of GPIOs configured as outputs.
pub struct SimProbe {
    pub outputs: Vec<i32>,
}

impl DirectionProbe for SimProbe {
    fn is_output(&self, gpio: i32) -> bool {
        self.outputs.contains(&gpio)
    }
}
