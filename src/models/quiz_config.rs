// src/models/quiz_config.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

pub const MAX_QUESTIONS_PER_LEVEL: u32 = 10;
pub const MAX_QUESTIONS_TOTAL: u32 = 30;

/// Generation mode: a fixed 30-question mix, or a custom per-difficulty
/// distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    Mixed,
    Custom,
}

/// Requested question count per difficulty tier, 0–10 each.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Validate)]
pub struct DifficultyCount {
    #[validate(range(min = 0, max = 10))]
    pub easy: u32,
    #[validate(range(min = 0, max = 10))]
    pub medium: u32,
    #[validate(range(min = 0, max = 10))]
    pub hard: u32,
}

impl DifficultyCount {
    pub fn total(&self) -> u32 {
        self.easy + self.medium + self.hard
    }
}

/// Payload for `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_distribution))]
pub struct QuizConfig {
    pub file_hash: String,
    pub mode: QuizMode,
    #[validate(nested)]
    pub custom_distribution: Option<DifficultyCount>,
}

impl QuizConfig {
    pub fn mixed(file_hash: impl Into<String>) -> Self {
        Self {
            file_hash: file_hash.into(),
            mode: QuizMode::Mixed,
            custom_distribution: Some(DifficultyCount {
                easy: 10,
                medium: 10,
                hard: 10,
            }),
        }
    }

    pub fn custom(file_hash: impl Into<String>, counts: DifficultyCount) -> Self {
        Self {
            file_hash: file_hash.into(),
            mode: QuizMode::Custom,
            custom_distribution: Some(counts),
        }
    }

    /// Validates the request client-side, mapping failures to the form-level
    /// error taxonomy. No state is mutated on rejection.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::ConfigValidation(e.to_string()))
    }
}

fn validate_distribution(config: &QuizConfig) -> Result<(), validator::ValidationError> {
    if config.mode == QuizMode::Custom {
        let counts = config
            .custom_distribution
            .ok_or_else(|| validator::ValidationError::new("distribution_required"))?;
        let total = counts.total();
        if total == 0 {
            return Err(validator::ValidationError::new("no_questions_requested"));
        }
        if total > MAX_QUESTIONS_TOTAL {
            return Err(validator::ValidationError::new("too_many_questions"));
        }
    }
    Ok(())
}
