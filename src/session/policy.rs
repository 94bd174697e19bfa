// src/session/policy.rs

use crate::models::violation::{VIOLATION_LIMIT, ViolationType};

/// Outcome of evaluating one violation against the escalation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyDecision {
    pub new_count: u8,
    pub should_auto_submit: bool,
}

/// Escalation rule for one recorded violation: increment the count, capped
/// at the limit; the limit being reached mandates auto-submission.
///
/// Pure and deterministic. The caller must not invoke it once the count is
/// already at the limit or while the session is not active. This is a local
/// prediction only — the server's `/proctor/log` reply carries the
/// authoritative count the controller adopts.
pub fn evaluate(current_count: u8, violation: ViolationType) -> PolicyDecision {
    debug_assert!(
        current_count < VIOLATION_LIMIT,
        "policy evaluated at terminal escalation"
    );
    let _ = violation; // every violation type escalates identically

    let new_count = (current_count + 1).min(VIOLATION_LIMIT);
    PolicyDecision {
        new_count,
        should_auto_submit: new_count >= VIOLATION_LIMIT,
    }
}
