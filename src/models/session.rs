// src/models/session.rs

use serde::{Deserialize, Serialize};

/// Question difficulty tier, serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One quiz question as delivered to the candidate (no answer key).
///
/// `options` maps short option labels (e.g. "A") to option text. The JSON
/// object order is the display order, so the map must preserve insertion
/// order (serde_json is built with `preserve_order`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub options: serde_json::Map<String, serde_json::Value>,
    pub difficulty: Difficulty,
}

impl Question {
    /// Option labels in display order.
    pub fn option_keys(&self) -> Vec<&str> {
        self.options.keys().map(String::as_str).collect()
    }
}

/// The session bundle returned by `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionBundle {
    pub session_id: String,
    pub test_name: String,
    pub questions: Vec<Question>,
}

/// One exam attempt as held by the client. Immutable once constructed;
/// all mutable exam state lives in the controller.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: String,
    pub test_name: String,
    pub questions: Vec<Question>,
    pub duration_secs: u32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    pub fn from_bundle(bundle: SessionBundle, duration_secs: u32) -> Self {
        Self {
            session_id: bundle.session_id,
            test_name: bundle.test_name,
            questions: bundle.questions,
            duration_secs,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Exam lifecycle phase.
///
/// `FullscreenLocked` is the blocking "must resume fullscreen" overlay
/// nested inside the logical active region: the exam clock keeps running
/// and violations are still recorded, but question interaction is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Active,
    FullscreenLocked,
    Submitting,
    Terminated,
}

impl SessionPhase {
    /// True while the exam is underway (clock ticking, monitor armed).
    pub fn is_running(self) -> bool {
        matches!(self, SessionPhase::Active | SessionPhase::FullscreenLocked)
    }

    /// True once the session can no longer be mutated.
    pub fn is_final(self) -> bool {
        matches!(self, SessionPhase::Submitting | SessionPhase::Terminated)
    }
}
