// src/models/violation.rs

use serde::{Deserialize, Serialize};

/// Integrity violation categories, one per environment signal class.
/// Serialized in the wire format the scoring service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationType {
    /// The exam document became non-visible (candidate switched tabs).
    TabSwitch,
    /// The application window lost input focus.
    WindowFocusLoss,
    /// Fullscreen presentation mode was exited.
    ExitFullscreen,
}

/// Why a submission was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReason {
    TimeExpired,
    ViolationLimit,
    Manual,
}

/// Auto-submit threshold: the third recorded violation ends the exam.
pub const VIOLATION_LIMIT: u8 = 3;

/// Running violation state for one session.
///
/// `count` mirrors the server-reported count (the system of record).
/// `predicted` is the locally computed fallback, bumped when the remote
/// logging call fails; it is display-only and never drives auto-submission.
#[derive(Debug, Clone, Default)]
pub struct ViolationRecord {
    pub count: u8,
    pub predicted: u8,
    pub last_type: Option<ViolationType>,
}

impl ViolationRecord {
    /// Count to show the candidate: server value when available, local
    /// prediction otherwise.
    pub fn display_count(&self) -> u8 {
        self.count.max(self.predicted)
    }

    pub fn at_limit(&self) -> bool {
        self.count >= VIOLATION_LIMIT
    }
}
