//! ESP32 clock adapter.
//!
//! Implements [`ClockPort`] with a wrapping millisecond counter.
//!
//! - **`target_os = "espidf"`** — `esp_timer_get_time()` (microseconds
//!   since boot) truncated to `u32` milliseconds, FreeRTOS delays.
//! - **`not(target_os = "espidf")`** — `std::time::Instant` and
//!   `std::thread::sleep` for host-side simulation.

use crate::app::ports::ClockPort;

pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for SystemClock {
    /// Milliseconds since boot; wraps after ~49.7 days.
    #[cfg(target_os = "espidf")]
    fn now_ms(&mut self) -> u32 {
        // SAFETY: esp_timer_get_time has no preconditions once the
        // esp_timer service is up, which happens before app_main.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        (us / 1_000) as u32
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&mut self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
