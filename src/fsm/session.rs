//! Session lifecycle and wrap-safe timing.

/// Exactly one of not started, running, ended.  There is no way back from
/// `Ended` short of a device restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    NotStarted,
    Running {
        start_ms: u32,
    },
    Ended {
        start_ms: u32,
    },
}

impl Session {
    /// Record the start instant.  Only meaningful from `NotStarted`.
    pub fn start(&mut self, now_ms: u32) {
        debug_assert!(
            matches!(self, Self::NotStarted),
            "session restarted without a device reset"
        );
        *self = Self::Running { start_ms: now_ms };
    }

    pub fn end(&mut self) {
        if let Self::Running { start_ms } = *self {
            *self = Self::Ended { start_ms };
        }
    }

    pub fn start_ms(&self) -> Option<u32> {
        match *self {
            Self::NotStarted => None,
            Self::Running { start_ms } | Self::Ended { start_ms } => Some(start_ms),
        }
    }

    pub fn is_started(&self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Milliseconds since start; correct across one wrap of the counter.
    pub fn elapsed_ms(&self, now_ms: u32) -> Option<u32> {
        self.start_ms().map(|start| now_ms.wrapping_sub(start))
    }

    /// Whether a running session has reached `duration_ms`.
    pub fn is_expired(&self, now_ms: u32, duration_ms: u32) -> bool {
        match *self {
            Self::Running { start_ms } => now_ms.wrapping_sub(start_ms) >= duration_ms,
            _ => false,
        }
    }
}
