// src/api.rs

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::{
    error::AppError,
    models::{
        answer::AnswerSubmission,
        quiz_config::QuizConfig,
        report::{HistoryItem, HistoryResponse, ScoredReport},
        session::SessionBundle,
        violation::ViolationType,
    },
};

/// Wire shape of the `POST /proctor/log` reply.
#[derive(Debug, Deserialize)]
struct ViolationLogResponse {
    violation_count: u8,
}

/// Client contract for the opaque scoring/content service.
///
/// The session controller only talks to the service through this seam, so
/// tests can substitute an in-memory double.
#[async_trait]
pub trait ScoringApi: Send + Sync {
    /// Requests a new session bundle for the given generation config.
    async fn generate(&self, config: &QuizConfig) -> Result<SessionBundle, AppError>;

    /// Reports one integrity violation and returns the server's
    /// authoritative running count for the session.
    async fn log_violation(
        &self,
        session_id: &str,
        violation: ViolationType,
    ) -> Result<u8, AppError>;

    /// Submits the ordered answer pairs for scoring.
    async fn submit(
        &self,
        session_id: &str,
        answers: &[AnswerSubmission],
    ) -> Result<ScoredReport, AppError>;

    /// Lists past scored attempts.
    async fn history(&self) -> Result<Vec<HistoryItem>, AppError>;

    /// Fetches the scored report of one past attempt.
    async fn history_detail(&self, session_id: &str) -> Result<ScoredReport, AppError>;

    /// URL of the downloadable report artifact (fetched outside the core).
    fn report_download_url(&self, session_id: &str) -> String;
}

/// `reqwest`-backed implementation of [`ScoringApi`].
#[derive(Debug, Clone)]
pub struct HttpScoringApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpScoringApi {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        // Trailing slash so Url::join keeps the base path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(&normalized)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl ScoringApi for HttpScoringApi {
    async fn generate(&self, config: &QuizConfig) -> Result<SessionBundle, AppError> {
        config.check()?;

        let response = self
            .client
            .post(self.endpoint("generate")?)
            .json(config)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach /generate: {:?}", e);
                AppError::Api(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(AppError::Api(format!(
                "generate returned {}",
                response.status()
            )));
        }

        response
            .json::<SessionBundle>()
            .await
            .map_err(|e| AppError::Api(e.to_string()))
    }

    async fn log_violation(
        &self,
        session_id: &str,
        violation: ViolationType,
    ) -> Result<u8, AppError> {
        let response = self
            .client
            .post(self.endpoint("proctor/log")?)
            .json(&json!({
                "session_id": session_id,
                "violation_type": violation,
            }))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to reach /proctor/log: {:?}", e);
                AppError::ViolationLog(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(AppError::ViolationLog(format!(
                "proctor/log returned {}",
                response.status()
            )));
        }

        let body = response
            .json::<ViolationLogResponse>()
            .await
            .map_err(|e| AppError::ViolationLog(e.to_string()))?;

        Ok(body.violation_count)
    }

    async fn submit(
        &self,
        session_id: &str,
        answers: &[AnswerSubmission],
    ) -> Result<ScoredReport, AppError> {
        let response = self
            .client
            .post(self.endpoint("submit")?)
            .json(&json!({
                "session_id": session_id,
                "answers": answers,
            }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach /submit: {:?}", e);
                AppError::Submission(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(AppError::Submission(format!(
                "submit returned {}",
                response.status()
            )));
        }

        response
            .json::<ScoredReport>()
            .await
            .map_err(|e| AppError::Submission(e.to_string()))
    }

    async fn history(&self) -> Result<Vec<HistoryItem>, AppError> {
        let response = self
            .client
            .get(self.endpoint("history")?)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach /history: {:?}", e);
                AppError::Api(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(AppError::Api(format!(
                "history returned {}",
                response.status()
            )));
        }

        let body = response
            .json::<HistoryResponse>()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        Ok(body.attempts)
    }

    async fn history_detail(&self, session_id: &str) -> Result<ScoredReport, AppError> {
        let response = self
            .client
            .get(self.endpoint(&format!("history/{}", session_id))?)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach /history/{}: {:?}", session_id, e);
                AppError::Api(e.to_string())
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::MissingSession(session_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(AppError::Api(format!(
                "history detail returned {}",
                response.status()
            )));
        }

        response
            .json::<ScoredReport>()
            .await
            .map_err(|e| AppError::Api(e.to_string()))
    }

    fn report_download_url(&self, session_id: &str) -> String {
        self.base_url
            .join(&format!("report/download/{}", session_id))
            .map(|u| u.to_string())
            .unwrap_or_default()
    }
}
