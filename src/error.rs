// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling for the exam session core.
///
/// Every failure path lands the session in a defined phase (Active or
/// Terminated) — see `session::controller`.
#[derive(Debug)]
pub enum AppError {
    /// Client-side quiz configuration rejected before any network work
    /// (e.g., zero questions requested, or more than 30 in total).
    ConfigValidation(String),

    /// The remote violation-logging call failed. Recovered locally: the
    /// warning is not escalated, since the server count is authoritative.
    ViolationLog(String),

    /// The remote scoring exchange failed. Recovered by reverting the
    /// session phase so a later trigger can retry.
    Submission(String),

    /// A session-bound operation was attempted with no session data present
    /// (the caller should redirect to the entry point).
    MissingSession(String),

    /// An operation arrived in a phase that does not permit it
    /// (e.g., answering after termination, manual submit while locked out).
    InvalidTransition(String),

    /// The server replied with a payload the client could not interpret.
    Api(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Api(err.to_string())
    }
}
