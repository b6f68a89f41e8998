//! GPIO direction probe adapter.
//!
//! - **`target_os = "espidf"`** — reads the output-enable registers
//!   (`GPIO_ENABLE_REG` for GPIO 0–31, `GPIO_ENABLE1_REG` for 32–48).
//! - **`not(target_os = "espidf")`** — a fixed list of output GPIOs,
//!   defaulting to the firmware's declared outputs.

use crate::drivers::port_access::DirectionProbe;
#[cfg(not(target_os = "espidf"))]
use crate::pins;

pub struct RegisterDirectionProbe {
    #[cfg(not(target_os = "espidf"))]
    outputs: heapless::Vec<i32, 16>,
}

impl Default for RegisterDirectionProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterDirectionProbe {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Self {
        Self {}
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self::with_outputs(&pins::OUTPUT_PINS)
    }

    /// Simulated probe reporting exactly `outputs` as outputs.
    #[cfg(not(target_os = "espidf"))]
    pub fn with_outputs(outputs: &[i32]) -> Self {
        Self {
            outputs: outputs.iter().copied().take(16).collect(),
        }
    }
}

impl DirectionProbe for RegisterDirectionProbe {
    #[cfg(target_os = "espidf")]
    fn is_output(&self, gpio: i32) -> bool {
        let (reg, bit) = match gpio {
            0..=31 => (crate::pins::GPIO_ENABLE_REG, gpio),
            32..=48 => (crate::pins::GPIO_ENABLE1_REG, gpio - 32),
            _ => return false,
        };
        // SAFETY: both addresses are the always-mapped, read-only-safe
        // GPIO output-enable registers of the ESP32-S3.
        let value = unsafe { core::ptr::read_volatile(reg as *const u32) };
        value & (1 << bit) != 0
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_output(&self, gpio: i32) -> bool {
        self.outputs.contains(&gpio)
    }
}
