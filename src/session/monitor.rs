// src/session/monitor.rs

use crate::environment::EnvironmentSignal;
use crate::models::violation::ViolationType;

/// What one environment signal means for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// A violation to record (and, for `ExitFullscreen`, a lock overlay to
    /// raise).
    Violation(ViolationType),
    /// Fullscreen was restored; clears the lock overlay, no violation.
    FullscreenRestored,
    /// Signal arrived while the monitor was disarmed (setup/teardown) or was
    /// folded into a violation already recorded this logical tick.
    Ignored,
}

/// Normalizes raw environment signals into violation events while the exam
/// is active.
///
/// Armed by the controller when the candidate starts the exam and disarmed
/// once submission begins, so signals during setup and teardown never count.
/// Near-simultaneous signals for one physical action (exiting fullscreen
/// also blurs the window) are coalesced: at most one violation is recorded
/// per logical tick.
#[derive(Debug, Default)]
pub struct IntegrityMonitor {
    armed: bool,
    last_violation_tick: Option<u64>,
}

impl IntegrityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Classifies one raw signal. `logical_tick` is the controller's event
    /// counter used for coalescing.
    pub fn observe(&mut self, signal: EnvironmentSignal, logical_tick: u64) -> Observation {
        // Restoring fullscreen must clear the overlay even when a violation
        // was coalesced this tick, so it is handled before the armed check.
        if let EnvironmentSignal::FullscreenChanged { active: true } = signal {
            return Observation::FullscreenRestored;
        }

        if !self.armed {
            return Observation::Ignored;
        }

        let violation = match signal {
            EnvironmentSignal::VisibilityHidden => ViolationType::TabSwitch,
            EnvironmentSignal::FocusLost => ViolationType::WindowFocusLoss,
            EnvironmentSignal::FullscreenChanged { active: false } => {
                ViolationType::ExitFullscreen
            }
            EnvironmentSignal::FullscreenChanged { active: true } => unreachable!(),
        };

        if self.last_violation_tick == Some(logical_tick) {
            return Observation::Ignored;
        }
        self.last_violation_tick = Some(logical_tick);
        Observation::Violation(violation)
    }
}
