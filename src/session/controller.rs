// src/session/controller.rs

use std::sync::Arc;

use crate::{
    api::ScoringApi,
    environment::{EnvironmentSignal, FullscreenControl},
    error::AppError,
    models::{
        answer::AnswerSet,
        report::ScoredReport,
        session::{Session, SessionPhase},
        violation::{SubmitReason, VIOLATION_LIMIT, ViolationRecord, ViolationType},
    },
    session::{
        clock::{ClockStatus, SessionClock},
        gate::{GateDecision, SubmissionGate},
        monitor::{IntegrityMonitor, Observation},
        policy,
    },
};

/// What changed as a result of one event, for the embedding surface to
/// render. Failures that the session recovers from locally (violation log
/// errors, scoring failures) surface here rather than as hard errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    None,
    ClockTick { remaining: u32 },
    ViolationRecorded { count: u8, violation: ViolationType },
    /// The remote log call failed; `predicted` is the display-only local
    /// count. No escalation happens on this path.
    ViolationLogFailed { predicted: u8, violation: ViolationType },
    FullscreenLocked,
    FullscreenRestored,
    Submitted(ScoredReport),
    /// Scoring exchange failed; the exam continues and a later trigger may
    /// retry.
    SubmissionFailed(String),
}

/// Orchestrates one proctored exam attempt: lifecycle phase, answers,
/// violation escalation, countdown, and the exactly-once submission.
///
/// Single update path: the embedder delivers environment signals, clock
/// ticks and candidate actions through these methods from one logical event
/// queue. The controller is not re-entrant; triggers racing with an
/// in-flight submission are dropped by the gate, never queued.
pub struct ProctoredSessionController {
    session: Session,
    phase: SessionPhase,
    answers: AnswerSet,
    violations: ViolationRecord,
    current_index: usize,
    logical_tick: u64,
    clock: SessionClock,
    monitor: IntegrityMonitor,
    gate: SubmissionGate,
    api: Arc<dyn ScoringApi>,
    fullscreen: Arc<dyn FullscreenControl>,
    fullscreen_active: bool,
}

impl ProctoredSessionController {
    /// Builds a controller for a freshly received session bundle.
    /// Entering a session-bound view without quiz data is a navigation
    /// error, not a crash.
    pub fn new(
        session: Session,
        api: Arc<dyn ScoringApi>,
        fullscreen: Arc<dyn FullscreenControl>,
    ) -> Result<Self, AppError> {
        if session.questions.is_empty() {
            return Err(AppError::MissingSession(
                "session contains no questions".to_string(),
            ));
        }
        Ok(Self {
            session,
            phase: SessionPhase::NotStarted,
            answers: AnswerSet::new(),
            violations: ViolationRecord::default(),
            current_index: 0,
            logical_tick: 0,
            clock: SessionClock::new(),
            monitor: IntegrityMonitor::new(),
            gate: SubmissionGate::new(),
            api,
            fullscreen,
            fullscreen_active: false,
        })
    }

    /// Candidate explicitly starts the exam: request fullscreen, start the
    /// countdown, arm the integrity monitor.
    ///
    /// A failed fullscreen request is logged but does not block the exam;
    /// the monitor will record the missing fullscreen as a violation once
    /// the environment reports it.
    pub async fn begin_exam(&mut self) -> Result<(), AppError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(AppError::InvalidTransition(format!(
                "begin_exam in phase {:?}",
                self.phase
            )));
        }

        match self.fullscreen.request().await {
            Ok(()) => self.fullscreen_active = true,
            Err(e) => tracing::warn!("Fullscreen request failed: {}", e),
        }

        self.clock.start(self.session.duration_secs);
        self.monitor.arm();
        self.phase = SessionPhase::Active;
        tracing::info!(
            session_id = %self.session.session_id,
            duration = self.session.duration_secs,
            "Exam started"
        );
        Ok(())
    }

    /// Handles one normalized environment signal.
    ///
    /// Signals before the exam starts and after submission begins are
    /// ignored. A recorded violation is reported to the scoring service and
    /// the server's returned count is adopted as authoritative; reaching the
    /// limit triggers auto-submission.
    pub async fn handle_signal(&mut self, signal: EnvironmentSignal) -> SessionUpdate {
        if !self.phase.is_running() {
            return SessionUpdate::None;
        }

        match self.monitor.observe(signal, self.logical_tick) {
            Observation::Ignored => SessionUpdate::None,
            Observation::FullscreenRestored => {
                self.fullscreen_active = true;
                if self.phase == SessionPhase::FullscreenLocked {
                    self.phase = SessionPhase::Active;
                    SessionUpdate::FullscreenRestored
                } else {
                    SessionUpdate::None
                }
            }
            Observation::Violation(violation) => self.record_violation(violation).await,
        }
    }

    async fn record_violation(&mut self, violation: ViolationType) -> SessionUpdate {
        // Exiting fullscreen raises the lock overlay regardless of whether
        // the remote log call succeeds.
        if violation == ViolationType::ExitFullscreen {
            self.fullscreen_active = false;
            self.phase = SessionPhase::FullscreenLocked;
        }

        // Already at the limit: a previous auto-submission must have failed
        // and been reverted, so retry it instead of logging again.
        if self.violations.at_limit() {
            return self.trigger_submission(SubmitReason::ViolationLimit).await;
        }

        // Local prediction, kept as a display fallback only.
        let predicted = policy::evaluate(self.violations.count, violation);

        match self
            .api
            .log_violation(&self.session.session_id, violation)
            .await
        {
            Ok(server_count) => {
                self.violations.count = server_count.min(VIOLATION_LIMIT);
                self.violations.predicted = self.violations.count;
                self.violations.last_type = Some(violation);
                tracing::info!(
                    session_id = %self.session.session_id,
                    ?violation,
                    count = self.violations.count,
                    "Violation recorded"
                );
                if self.violations.at_limit() {
                    return self.trigger_submission(SubmitReason::ViolationLimit).await;
                }
                SessionUpdate::ViolationRecorded {
                    count: self.violations.count,
                    violation,
                }
            }
            Err(e) => {
                // Fail safe: the server count is the system of record, so a
                // lost log call never escalates locally.
                tracing::warn!("Failed to log violation: {}", e);
                self.violations.predicted = predicted.new_count;
                self.violations.last_type = Some(violation);
                SessionUpdate::ViolationLogFailed {
                    predicted: self.violations.predicted,
                    violation,
                }
            }
        }
    }

    /// Advances the session by one elapsed second. The embedder calls this
    /// once per second; ticks are suppressed while the exam is not running,
    /// so the clock never advances before start or during submission.
    pub async fn handle_tick(&mut self) -> SessionUpdate {
        if !self.phase.is_running() {
            return SessionUpdate::None;
        }
        self.logical_tick += 1;

        match self.clock.tick() {
            ClockStatus::Running(remaining) => SessionUpdate::ClockTick { remaining },
            ClockStatus::Expired => self.trigger_submission(SubmitReason::TimeExpired).await,
            ClockStatus::Idle => SessionUpdate::None,
        }
    }

    /// Candidate re-requests fullscreen from the lock overlay. The recorded
    /// violation stands; only the interaction gate is lifted.
    pub async fn resume_fullscreen(&mut self) -> Result<(), AppError> {
        if self.phase != SessionPhase::FullscreenLocked {
            return Err(AppError::InvalidTransition(format!(
                "resume_fullscreen in phase {:?}",
                self.phase
            )));
        }
        self.fullscreen.request().await?;
        self.fullscreen_active = true;
        self.phase = SessionPhase::Active;
        Ok(())
    }

    /// Records (or replaces) the candidate's selection for a question.
    /// Rejected while the lock overlay is up and once the session is final.
    pub fn select_answer(
        &mut self,
        question_id: i64,
        option_key: &str,
    ) -> Result<(), AppError> {
        if self.phase != SessionPhase::Active {
            return Err(AppError::InvalidTransition(format!(
                "select_answer in phase {:?}",
                self.phase
            )));
        }
        let question = self
            .session
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| {
                AppError::InvalidTransition(format!("question {} not in session", question_id))
            })?;
        if !question.options.contains_key(option_key) {
            return Err(AppError::InvalidTransition(format!(
                "option {:?} not offered by question {}",
                option_key, question_id
            )));
        }
        self.answers.select(question_id, option_key);
        Ok(())
    }

    /// True once every question in the session has an answer. Exposed so
    /// any client surface gates manual submission consistently.
    pub fn all_answered(&self) -> bool {
        self.answers.len() == self.session.question_count()
    }

    /// Candidate-initiated submission; only available with a complete
    /// answer set.
    pub async fn submit_manual(&mut self) -> Result<SessionUpdate, AppError> {
        if !self.phase.is_running() {
            return Err(AppError::InvalidTransition(format!(
                "submit_manual in phase {:?}",
                self.phase
            )));
        }
        if !self.all_answered() {
            return Err(AppError::InvalidTransition(format!(
                "manual submit with {}/{} questions answered",
                self.answers.len(),
                self.session.question_count()
            )));
        }
        Ok(self.trigger_submission(SubmitReason::Manual).await)
    }

    /// The single submission path: latch the gate, snapshot the answers in
    /// question order, run the scoring exchange. Success terminates the
    /// session and releases fullscreen; failure reverts to the phase the
    /// exam was in so a later trigger can retry.
    async fn trigger_submission(&mut self, reason: SubmitReason) -> SessionUpdate {
        match self.gate.try_begin(reason) {
            GateDecision::AlreadyInFlight => return SessionUpdate::None,
            GateDecision::AlreadyCompleted(report) => {
                return SessionUpdate::Submitted(report);
            }
            GateDecision::Begun => {}
        }

        let prev_phase = self.phase;
        self.phase = SessionPhase::Submitting;
        self.monitor.disarm();

        let pairs = self.answers.ordered_pairs(&self.session.questions);
        tracing::info!(
            session_id = %self.session.session_id,
            ?reason,
            answered = pairs.len(),
            total = self.session.question_count(),
            "Submitting session"
        );

        match self.api.submit(&self.session.session_id, &pairs).await {
            Ok(report) => {
                self.gate.complete(report.clone());
                self.phase = SessionPhase::Terminated;
                if self.fullscreen_active {
                    if let Err(e) = self.fullscreen.exit().await {
                        tracing::warn!("Failed to release fullscreen: {}", e);
                    }
                    self.fullscreen_active = false;
                }
                tracing::info!(
                    session_id = %self.session.session_id,
                    accuracy = report.accuracy,
                    "Session terminated"
                );
                SessionUpdate::Submitted(report)
            }
            Err(e) => {
                tracing::error!("Submission failed: {}", e);
                self.gate.abort();
                self.phase = prev_phase;
                self.monitor.arm();
                SessionUpdate::SubmissionFailed(e.to_string())
            }
        }
    }

    // --- question pointer -------------------------------------------------

    pub fn goto_question(&mut self, index: usize) -> Result<(), AppError> {
        if index >= self.session.question_count() {
            return Err(AppError::InvalidTransition(format!(
                "question index {} out of range",
                index
            )));
        }
        self.current_index = index;
        Ok(())
    }

    pub fn next_question(&mut self) {
        if self.current_index + 1 < self.session.question_count() {
            self.current_index += 1;
        }
    }

    pub fn prev_question(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    // --- read-only views --------------------------------------------------

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn violations(&self) -> &ViolationRecord {
        &self.violations
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_secs(&self) -> u32 {
        self.clock.remaining_secs()
    }

    pub fn report(&self) -> Option<&ScoredReport> {
        self.gate.completed_report()
    }
}
