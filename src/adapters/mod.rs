//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements      | Connects to                 |
//! |------------------|-----------------|-----------------------------|
//! | `display`        | DisplayPort     | Serial log (OLED stand-in)  |
//! | `gpio_direction` | DirectionProbe  | GPIO output-enable register |
//! | `log_sink`       | EventSink       | Serial log output           |
//! | `nvs`            | HighScoreStore  | NVS / in-memory slot        |
//! | `time`           | ClockPort       | ESP32 system timer          |

pub mod display;
pub mod gpio_direction;
pub mod log_sink;
pub mod nvs;
pub mod time;
