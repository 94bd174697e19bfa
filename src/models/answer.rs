// src/models/answer.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::session::Question;

/// One (question, selected option) pair in the `POST /submit` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: i64,
    pub selected_answer: String,
}

/// The candidate's current answers, keyed by question id.
///
/// An entry exists only once the candidate has selected an option for that
/// question; reselection overwrites. There is deliberately no removal API:
/// the set never shrinks during an exam.
#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    answers: HashMap<i64, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) the selection for a question.
    pub fn select(&mut self, question_id: i64, option_key: impl Into<String>) {
        self.answers.insert(question_id, option_key.into());
    }

    pub fn get(&self, question_id: i64) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Snapshots the set as submission pairs, ordered by the session's
    /// question order. Unanswered questions are omitted, which is a
    /// legitimate state for time-expiry and violation-limit submissions.
    pub fn ordered_pairs(&self, questions: &[Question]) -> Vec<AnswerSubmission> {
        questions
            .iter()
            .filter_map(|q| {
                self.answers.get(&q.id).map(|ans| AnswerSubmission {
                    question_id: q.id,
                    selected_answer: ans.clone(),
                })
            })
            .collect()
    }
}
