// src/session/gate.rs

use crate::models::report::ScoredReport;
use crate::models::violation::SubmitReason;

/// Result of asking the gate for permission to submit.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// This caller owns the submission attempt.
    Begun,
    /// Another attempt is in flight; this trigger is dropped, not queued.
    AlreadyInFlight,
    /// A previous attempt already succeeded; its report is returned instead
    /// of re-issuing network work.
    AlreadyCompleted(ScoredReport),
}

#[derive(Debug, Default)]
enum GateState {
    #[default]
    Idle,
    InFlight(SubmitReason),
    Completed(ScoredReport),
}

/// At-most-once latch around the scoring exchange.
///
/// The first trigger wins; triggers racing with an in-flight attempt are
/// suppressed. A failed exchange releases the latch so a later trigger can
/// retry.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    state: GateState,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&mut self, reason: SubmitReason) -> GateDecision {
        match &self.state {
            GateState::Idle => {
                self.state = GateState::InFlight(reason);
                GateDecision::Begun
            }
            GateState::InFlight(_) => GateDecision::AlreadyInFlight,
            GateState::Completed(report) => GateDecision::AlreadyCompleted(report.clone()),
        }
    }

    /// Records a successful exchange. Later triggers get the report back.
    pub fn complete(&mut self, report: ScoredReport) {
        self.state = GateState::Completed(report);
    }

    /// Releases the latch after a failed exchange so the session can retry.
    pub fn abort(&mut self) {
        if matches!(self.state, GateState::InFlight(_)) {
            self.state = GateState::Idle;
        }
    }

    pub fn in_flight(&self) -> bool {
        matches!(self.state, GateState::InFlight(_))
    }

    pub fn completed_report(&self) -> Option<&ScoredReport> {
        match &self.state {
            GateState::Completed(report) => Some(report),
            _ => None,
        }
    }
}
