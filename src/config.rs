// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Default exam duration when the environment does not override it.
pub const DEFAULT_EXAM_DURATION_SECS: u32 = 1800;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote scoring/content service (e.g. "http://localhost:8000/api").
    pub scoring_base_url: String,
    /// Countdown length for a single exam attempt, in seconds.
    pub exam_duration_secs: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let scoring_base_url =
            env::var("SCORING_BASE_URL").expect("SCORING_BASE_URL must be set");

        let exam_duration_secs = env::var("EXAM_DURATION_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EXAM_DURATION_SECS);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            scoring_base_url,
            exam_duration_secs,
            rust_log,
        }
    }
}
