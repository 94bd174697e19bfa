// src/session/clock.rs

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    /// Still counting down; carries the remaining seconds after this tick.
    Running(u32),
    /// Remaining time just reached zero. Yielded exactly once.
    Expired,
    /// Not started, or already expired on an earlier tick.
    Idle,
}

/// Single countdown for one exam attempt.
///
/// The clock holds no timer of its own: the controller's event loop calls
/// `tick()` once per elapsed second, and only while the exam is running.
/// There is no pause — once started, the countdown runs to zero.
#[derive(Debug, Default)]
pub struct SessionClock {
    remaining: u32,
    started: bool,
    expired: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, duration_secs: u32) {
        self.remaining = duration_secs;
        self.started = true;
        self.expired = false;
    }

    /// Advances the countdown by one second. Remaining time clamps at zero
    /// and is never negative; `Expired` is reported exactly once.
    pub fn tick(&mut self) -> ClockStatus {
        if !self.started || self.expired {
            return ClockStatus::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expired = true;
            return ClockStatus::Expired;
        }
        ClockStatus::Running(self.remaining)
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}
