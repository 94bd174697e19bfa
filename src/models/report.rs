// src/models/report.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Correct/total counts for one difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyStat {
    pub score: f64,
    pub total: f64,
}

/// The server's graded summary of a submitted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredReport {
    pub session_id: String,
    pub test_name: String,
    pub total_score: f64,
    pub max_score: f64,
    /// Percentage in 0–100.
    pub accuracy: f64,
    #[serde(default)]
    pub difficulty_breakdown: HashMap<String, DifficultyStat>,
    #[serde(default)]
    pub report_url: String,
}

/// One row of the past-attempts listing (`GET /history`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub session_id: String,
    pub test_name: String,
    pub accuracy: f64,
    pub total_score: f64,
    pub max_score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub difficulty_stats: HashMap<String, DifficultyStat>,
    pub status: String,
}

/// Envelope for the history listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub attempts: Vec<HistoryItem>,
}
